use crate::*;

/// Maps player actions onto board mutations.
///
/// Sessions only talk to the board through this trait, so rule variants can be
/// swapped in without touching [`Board`] or [`Session`].
pub trait Rules {
    fn reveal(&self, board: &mut Board, coords: Coord2) -> Result<ActionResult>;

    fn toggle_mark(&self, board: &mut Board, coords: Coord2) -> Result<FlagDelta>;
}

impl<R: Rules + ?Sized> Rules for Box<R> {
    fn reveal(&self, board: &mut Board, coords: Coord2) -> Result<ActionResult> {
        (**self).reveal(board, coords)
    }

    fn toggle_mark(&self, board: &mut Board, coords: Coord2) -> Result<FlagDelta> {
        (**self).toggle_mark(board, coords)
    }
}

/// Classic rules: safe first click, marked tiles cannot be revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassicRules;

impl Rules for ClassicRules {
    fn reveal(&self, board: &mut Board, coords: Coord2) -> Result<ActionResult> {
        let coords = board.validate_coords(coords)?;
        if !board.mines_placed() {
            let marks = board.marks();
            board.place_mines(coords)?;
            board.restore_marks(&marks);
        }

        if board.visibility_at(coords)?.is_marked() {
            log::debug!("Ignoring reveal of marked tile at {:?}", coords);
            return Ok(ActionResult::unchanged(board.is_win()));
        }

        board.reveal(coords, true)
    }

    fn toggle_mark(&self, board: &mut Board, coords: Coord2) -> Result<FlagDelta> {
        board.toggle_mark(coords)
    }
}
