use egui::{Context, LayerId, PointerButton, Pos2, Rect};

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// The position relative to the top-left corner of the drawing surface
    pub position: Pos2,
    /// Whether this position is within the drawing surface
    pub is_in_canvas: bool,
}

/// Pointer events the paint session reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the surface
    PointerDown { location: InputLocation },
    /// Pointer moved over the surface, with or without a button held
    PointerMove { location: InputLocation },
    /// Primary button released, anywhere
    PointerUp { location: InputLocation },
    /// Pointer left the surface
    PointerLeave { last_known_location: InputLocation },
}

/// Turns raw egui input into surface-relative `InputEvent`s, in delivery order
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    pointer_inside: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            pointer_inside: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    /// `covered` tells whether something drawn above the surface (a popup,
    /// a window) owns the pointer at a position. Covered positions count as
    /// outside the surface.
    fn make_location(&self, pos: Pos2, covered: &dyn Fn(Pos2) -> bool) -> InputLocation {
        InputLocation {
            position: (pos - self.canvas_rect.min).to_pos2(),
            is_in_canvas: self.canvas_rect.contains(pos) && !covered(pos),
        }
    }

    fn leave(&mut self, pos: Pos2, covered: &dyn Fn(Pos2) -> bool) -> Option<InputEvent> {
        if !self.pointer_inside {
            return None;
        }
        self.pointer_inside = false;
        Some(InputEvent::PointerLeave {
            last_known_location: self.make_location(pos, covered),
        })
    }

    /// Translate one raw event. Events that mean nothing to the surface give `None`.
    pub fn translate(
        &mut self,
        event: &egui::Event,
        last_pos: Pos2,
        covered: &dyn Fn(Pos2) -> bool,
    ) -> Option<InputEvent> {
        match event {
            egui::Event::PointerMoved(pos) => {
                let location = self.make_location(*pos, covered);
                if location.is_in_canvas {
                    self.pointer_inside = true;
                    Some(InputEvent::PointerMove { location })
                } else {
                    self.leave(*pos, covered)
                }
            }
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                let location = self.make_location(*pos, covered);
                if !*pressed {
                    Some(InputEvent::PointerUp { location })
                } else if location.is_in_canvas {
                    self.pointer_inside = true;
                    Some(InputEvent::PointerDown { location })
                } else {
                    None
                }
            }
            egui::Event::PointerGone => self.leave(last_pos, covered),
            _ => None,
        }
    }

    /// Process raw egui input and generate our InputEvents.
    ///
    /// `canvas_layer` is the layer the surface is painted on. Positions where
    /// another layer is on top are not on the surface.
    pub fn process_input(&mut self, ctx: &Context, canvas_layer: LayerId) -> Vec<InputEvent> {
        let (raw_events, latest_pos) =
            ctx.input(|input| (input.raw.events.clone(), input.pointer.latest_pos()));
        let covered = |pos: Pos2| ctx.layer_id_at(pos).is_some_and(|layer| layer != canvas_layer);

        let mut last_pos = latest_pos.unwrap_or(self.canvas_rect.min);
        let mut events = Vec::new();
        for raw in &raw_events {
            if let Some(event) = self.translate(raw, last_pos, &covered) {
                events.push(event);
            }
            if let egui::Event::PointerMoved(pos) = raw {
                last_pos = *pos;
            }
        }
        events
    }
}
