use crate::stroke::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    Painting {
        /// Last point recorded in this stroke; the next move connects to it
        last: Option<Point>,
    },
}

impl EditorState {
    pub fn begin_painting(&mut self) {
        *self = Self::Painting { last: None };
    }

    /// Remember `point` as the end of the current stroke and hand back the
    /// previous end, if there was one
    pub fn advance(&mut self, point: Point) -> Option<Point> {
        match self {
            Self::Painting { last, .. } => last.replace(point),
            Self::Idle => None,
        }
    }

    pub fn return_to_idle(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_painting(&self) -> bool {
        matches!(self, Self::Painting { .. })
    }
}
