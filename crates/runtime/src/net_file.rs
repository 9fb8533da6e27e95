//! JSON exchange format for cube nets.
//!
//! A net file is an object keyed by face letter, each face a 3×3 grid of
//! single-character color codes. Empty string or `"."` means the cell is
//! unset. Missing faces are treated as fully unset, so partially colored
//! cubes (one photographed face at a time) round-trip naturally.
//!
//! ```json
//! { "U": [["w","w","w"],["w","w","w"],["w","w","w"]], "F": [...] }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use strum::IntoEnumIterator;
use thiserror::Error;

use cube_core::{BLANK_CODE, Color, CubeState, Face, FaceParseError, Net, net_from_state, state_from_net};

type FaceGrid = [[String; 3]; 3];

#[derive(Debug, Error)]
pub enum NetFileError {
    #[error("failed to read or write net file")]
    Io(#[from] std::io::Error),

    #[error("net file is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Face(#[from] FaceParseError),

    #[error("face {face} cell ({row},{col}) holds unknown color code {code:?}")]
    BadColor {
        face: Face,
        row: usize,
        col: usize,
        code: String,
    },
}

/// Reads a net file into a cube state. Piece identity is rebuilt from the
/// color assignment; unset cells stay blank.
pub fn load_net_file(path: &Path) -> Result<CubeState, NetFileError> {
    let text = std::fs::read_to_string(path)?;
    let grids: BTreeMap<String, FaceGrid> = serde_json::from_str(&text)?;

    let mut net = Net::empty();
    for (letter, grid) in &grids {
        let face: Face = letter.parse()?;
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                net.set(face, row, col, parse_cell(face, row, col, cell)?);
            }
        }
    }
    Ok(state_from_net(&net))
}

/// Writes the state's net as JSON, one entry per face in URFDLB order.
pub fn save_net_file(path: &Path, state: &CubeState) -> Result<(), NetFileError> {
    let net = net_from_state(state);
    let mut grids: BTreeMap<String, FaceGrid> = BTreeMap::new();
    for face in Face::iter() {
        let mut grid: FaceGrid = Default::default();
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                let code = net
                    .get(face, row, col)
                    .map_or(BLANK_CODE, |color| color.code());
                *cell = code.to_string();
            }
        }
        grids.insert(face.letter().to_string(), grid);
    }
    let text = serde_json::to_string_pretty(&grids)?;
    std::fs::write(path, text)?;
    Ok(())
}

fn parse_cell(
    face: Face,
    row: usize,
    col: usize,
    cell: &str,
) -> Result<Option<Color>, NetFileError> {
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(code), None) if code == BLANK_CODE => Ok(None),
        (Some(code), None) => match Color::from_code(code) {
            Some(color) => Ok(Some(color)),
            None => Err(bad_color(face, row, col, cell)),
        },
        _ => Err(bad_color(face, row, col, cell)),
    }
}

fn bad_color(face: Face, row: usize, col: usize, cell: &str) -> NetFileError {
    NetFileError::BadColor {
        face,
        row,
        col,
        code: cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cube_core::{LatticePos, Slot, encode};

    #[test]
    fn solved_state_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");

        let state = CubeState::solved();
        save_net_file(&path, &state).unwrap();
        let loaded = load_net_file(&path).unwrap();

        assert_eq!(encode(&loaded), encode(&state));
    }

    #[test]
    fn missing_faces_default_to_unset_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(
            &path,
            r#"{ "U": [["w","w","w"],["w","w","w"],["w","w","w"]] }"#,
        )
        .unwrap();

        let state = load_net_file(&path).unwrap();
        let up_center = state.piece_at(LatticePos::new(0, 1, 0)).unwrap();
        assert_eq!(up_center.sticker(Slot::PosY), Some(Color::White));
        let front_center = state.piece_at(LatticePos::new(0, 0, 1)).unwrap();
        assert_eq!(front_center.sticker(Slot::PosZ), None);
    }

    #[test]
    fn dot_and_empty_string_both_mean_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blanks.json");
        std::fs::write(
            &path,
            r#"{ "U": [["w",".",""],["w","w","w"],["w","w","w"]] }"#,
        )
        .unwrap();

        let state = load_net_file(&path).unwrap();
        let flat = encode(&state);
        assert!(flat.starts_with("w.."));
    }

    #[test]
    fn unknown_color_code_is_rejected_with_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{ "U": [["w","q","w"],["w","w","w"],["w","w","w"]] }"#,
        )
        .unwrap();

        let err = load_net_file(&path).unwrap_err();
        match err {
            NetFileError::BadColor { face, row, col, code } => {
                assert_eq!(face, Face::Up);
                assert_eq!((row, col), (0, 1));
                assert_eq!(code, "q");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_face_letter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.json");
        std::fs::write(&path, r#"{ "X": [["w","w","w"],["w","w","w"],["w","w","w"]] }"#).unwrap();
        assert!(matches!(
            load_net_file(&path).unwrap_err(),
            NetFileError::Face(_)
        ));
    }
}
