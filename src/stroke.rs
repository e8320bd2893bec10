use egui::{Color32, Pos2};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::color;
use crate::error::{PaintError, PaintResult};

/// One recorded pointer position together with the tool state it was painted with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub pos: Pos2,
    pub size: f32,
    pub color: Color32,
    pub is_eraser: bool,
}

impl Point {
    pub fn new(pos: Pos2, size: f32, color: Color32, is_eraser: bool) -> Self {
        Self {
            pos,
            size,
            color,
            is_eraser,
        }
    }

    /// The colour this point is painted with. Eraser points always take the
    /// background colour at the time they are drawn, not the one they were
    /// recorded with.
    pub fn effective_color(&self, background: Color32) -> Color32 {
        if self.is_eraser {
            background
        } else {
            self.color
        }
    }

    /// Read one stored record. Anything that does not describe a complete
    /// point yields `None`.
    fn from_record(record: &Value) -> Option<Self> {
        let object = record.as_object()?;
        let x = finite(object.get("x")?)?;
        let y = finite(object.get("y")?)?;
        let size = match object.get("size")? {
            // sizes below ten were stored zero-padded ("05") by older saves
            Value::String(text) => text.trim().parse::<f32>().ok()?,
            other => finite(other)?,
        };
        if !size.is_finite() || size <= 0.0 {
            return None;
        }
        let color = color::parse_hex(object.get("color")?.as_str()?)?;
        let is_eraser = object
            .get("erase")
            .or_else(|| object.get("isEraser"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Some(Self::new(Pos2::new(x, y), size, color, is_eraser))
    }
}

fn finite(value: &Value) -> Option<f32> {
    let number = value.as_f64()? as f32;
    number.is_finite().then_some(number)
}

/// An entry in the stroke sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEvent {
    Point(Point),
    /// No segment may connect through this entry
    Gap,
}

impl StrokeEvent {
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Self::Point(point) => Some(point),
            Self::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl From<Point> for StrokeEvent {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl Serialize for StrokeEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // a gap is stored as an empty record
            Self::Gap => serializer.serialize_map(Some(0))?.end(),
            Self::Point(point) => {
                let mut map = serializer.serialize_map(Some(5))?;
                map.serialize_entry("x", &point.pos.x)?;
                map.serialize_entry("y", &point.pos.y)?;
                map.serialize_entry("size", &point.size)?;
                map.serialize_entry("color", &color::to_hex(point.color))?;
                map.serialize_entry("erase", &point.is_eraser)?;
                map.end()
            }
        }
    }
}

/// Ordered record of everything painted, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeStore {
    events: Vec<StrokeEvent>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: impl Into<StrokeEvent>) {
        self.events.push(event.into());
    }

    /// Replace the whole sequence with stored records.
    ///
    /// The input must be a sequence; individual records that cannot be read
    /// become gaps instead of failing the load. On error the store is left
    /// untouched.
    pub fn replace_all(&mut self, records: &Value) -> PaintResult<()> {
        let Some(records) = records.as_array() else {
            return Err(PaintError::MalformedData(format!(
                "expected a sequence of points, found {}",
                json_kind(records)
            )));
        };

        let events: Vec<StrokeEvent> = records
            .iter()
            .map(|record| Point::from_record(record).map_or(StrokeEvent::Gap, StrokeEvent::Point))
            .collect();

        let gaps = events.iter().filter(|event| event.is_gap()).count();
        log::debug!("Loaded {} stroke entries ({} gaps)", events.len(), gaps);

        self.events = events;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn serialize(&self) -> PaintResult<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    /// Parse `text` and replace the sequence with it. Invalid text leaves the
    /// existing sequence as it was.
    pub fn deserialize(&mut self, text: &str) -> PaintResult<()> {
        let records: Value = serde_json::from_str(text)?;
        self.replace_all(&records)
    }

    pub fn events(&self) -> &[StrokeEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&StrokeEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn purple(x: f32, y: f32) -> Point {
        Point::new(Pos2::new(x, y), 10.0, Color32::from_rgb(0xA5, 0x1D, 0xAB), false)
    }

    #[test]
    fn test_gap_serializes_as_empty_record() {
        let mut store = StrokeStore::new();
        store.append(StrokeEvent::Gap);
        assert_eq!(store.serialize().unwrap(), "[{}]");
    }

    #[test]
    fn test_point_record_layout() {
        let mut store = StrokeStore::new();
        store.append(purple(10.0, 10.0));
        let value: Value = serde_json::from_str(&store.serialize().unwrap()).unwrap();
        assert_eq!(
            value,
            json!([{"x": 10.0, "y": 10.0, "size": 10.0, "color": "#A51DAB", "erase": false}])
        );
    }

    #[test]
    fn test_bad_records_become_gaps() {
        let mut store = StrokeStore::new();
        store
            .replace_all(&json!([
                {"x": 1, "y": 2, "size": 3, "color": "#000000", "erase": false},
                {"x": 1, "y": 2},
                {"x": "a", "y": 2, "size": 3, "color": "#000000"},
                {"x": 1, "y": 2, "size": 3, "color": "purple"},
                42,
                null
            ]))
            .unwrap();

        assert_eq!(store.len(), 6);
        assert!(store.events()[0].as_point().is_some());
        assert!(store.events()[1..].iter().all(StrokeEvent::is_gap));
    }

    #[test]
    fn test_padded_string_size_and_missing_flag() {
        let mut store = StrokeStore::new();
        store
            .replace_all(&json!([{"x": 4, "y": 5, "size": "05", "color": "a51dab"}]))
            .unwrap();
        assert_eq!(store.events()[0], StrokeEvent::Point(Point::new(Pos2::new(4.0, 5.0), 5.0, Color32::from_rgb(0xA5, 0x1D, 0xAB), false)));
    }

    #[test]
    fn test_non_sequence_is_rejected_without_mutation() {
        let mut store = StrokeStore::new();
        store.append(purple(1.0, 1.0));

        let err = store.replace_all(&json!({"x": 1})).unwrap_err();
        assert!(matches!(err, PaintError::MalformedData(_)));
        assert_eq!(store.len(), 1);

        assert!(matches!(store.deserialize("not json"), Err(PaintError::MalformedData(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties() {
        let mut store = StrokeStore::new();
        store.append(purple(1.0, 1.0));
        store.append(StrokeEvent::Gap);
        store.clear();
        assert!(store.is_empty());
    }
}
