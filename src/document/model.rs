/*!
 * In-memory model of an exported XLIFF document.
 *
 * The document keeps every XML event it was parsed from, so serialization reproduces
 * the input byte for byte except where a unit was annotated or removed. Translation
 * units are indexed once at parse time; mutations are recorded against that index
 * and applied while writing.
 */

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesText, Event};
use std::collections::HashMap;

use crate::errors::UnitError;

const UNIT_TAG: &[u8] = b"trans-unit";
const NOTE_TAG: &[u8] = b"note";

/// Stable handle to a translation unit inside one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitIndex(usize);

/// Snapshot of a live translation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableUnit {
    /// Handle used to mutate the unit
    pub index: UnitIndex,
    /// Value of the `id` attribute
    pub id: String,
    /// Current note content, `None` if the unit has no note element
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UnitState {
    Original,
    Annotated(String),
    Removed,
}

/// Event range of an element, inclusive on both ends. Equal bounds mean a self-closing element.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

#[derive(Debug, Clone)]
struct UnitRecord {
    id: Option<String>,
    span: Span,
    note: Option<Span>,
    state: UnitState,
}

/// A parsed localization document with pending unit mutations
#[derive(Debug, Clone)]
pub struct LocalizationDocument {
    bom: bool,
    events: Vec<Event<'static>>,
    units: Vec<UnitRecord>,
}

/// Partially parsed unit while its end tag is still ahead
struct OpenUnit {
    record: UnitRecord,
    depth: usize,
}

impl LocalizationDocument {
    /// Parse XML text into a document. Errors carry the parser message.
    pub fn parse(xml: &str) -> Result<Self, String> {
        let (bom, xml) = match xml.strip_prefix('\u{feff}') {
            Some(rest) => (true, rest),
            None => (false, xml),
        };
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut events: Vec<Event<'static>> = Vec::new();
        let mut units: Vec<UnitRecord> = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut open: Option<OpenUnit> = None;
        let mut open_note: Option<usize> = None;

        loop {
            let event = match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(event) => event.into_owned(),
                Err(e) => {
                    return Err(format!("{} (at byte {})", e, reader.buffer_position()));
                }
            };
            let index = events.len();

            match &event {
                Event::Start(e) => {
                    if depth == 0 && seen_root {
                        return Err("multiple root elements".to_string());
                    }
                    seen_root = true;
                    depth += 1;
                    let name = e.local_name();
                    if name.as_ref() == UNIT_TAG && open.is_none() {
                        open = Some(OpenUnit {
                            record: UnitRecord {
                                id: unit_id(e),
                                span: Span { start: index, end: index },
                                note: None,
                                state: UnitState::Original,
                            },
                            depth,
                        });
                    } else if name.as_ref() == NOTE_TAG {
                        if let Some(unit) = open.as_mut() {
                            if unit.record.note.is_none() && depth == unit.depth + 1 {
                                open_note = Some(index);
                            }
                        }
                    }
                }
                Event::Empty(e) => {
                    if depth == 0 && seen_root {
                        return Err("multiple root elements".to_string());
                    }
                    seen_root = true;
                    let name = e.local_name();
                    if name.as_ref() == UNIT_TAG && open.is_none() {
                        units.push(UnitRecord {
                            id: unit_id(e),
                            span: Span { start: index, end: index },
                            note: None,
                            state: UnitState::Original,
                        });
                    } else if name.as_ref() == NOTE_TAG {
                        if let Some(unit) = open.as_mut() {
                            if unit.record.note.is_none() && depth == unit.depth {
                                unit.record.note = Some(Span { start: index, end: index });
                            }
                        }
                    }
                }
                Event::End(e) => {
                    if depth == 0 {
                        return Err(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ));
                    }
                    let name = e.local_name();
                    if name.as_ref() == NOTE_TAG {
                        if let (Some(start), Some(unit)) = (open_note, open.as_mut()) {
                            if depth == unit.depth + 1 {
                                unit.record.note = Some(Span { start, end: index });
                                open_note = None;
                            }
                        }
                    } else if name.as_ref() == UNIT_TAG {
                        if open.as_ref().is_some_and(|unit| unit.depth == depth) {
                            if let Some(mut unit) = open.take() {
                                unit.record.span.end = index;
                                units.push(unit.record);
                            }
                            open_note = None;
                        }
                    }
                    depth -= 1;
                }
                Event::Text(t) => {
                    if depth == 0 && !is_whitespace(t) {
                        return Err("text outside of the root element".to_string());
                    }
                }
                _ => {}
            }
            events.push(event);
        }

        if depth != 0 {
            return Err("unexpected end of document, unclosed elements remain".to_string());
        }
        if !seen_root {
            return Err("document has no root element".to_string());
        }

        Ok(Self { bom, events, units })
    }

    /// Live units in document order
    pub fn units(&self) -> Vec<TranslatableUnit> {
        self.indexed_ids()
            .filter_map(|(index, _)| self.get(index))
            .collect()
    }

    /// Handles and identifiers of the live units that have an identifier
    pub fn indexed_ids(&self) -> impl Iterator<Item = (UnitIndex, &str)> + '_ {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, record)| record.state != UnitState::Removed)
            .filter_map(|(i, record)| Some((UnitIndex(i), record.id.as_deref()?)))
    }

    /// Snapshot of a live unit
    pub fn get(&self, index: UnitIndex) -> Option<TranslatableUnit> {
        let record = self.units.get(index.0)?;
        if record.state == UnitState::Removed {
            return None;
        }
        Some(TranslatableUnit {
            index,
            id: record.id.clone()?,
            note: self.note_of(record),
        })
    }

    /// Identifiers of the live units, in document order
    pub fn unit_ids(&self) -> Vec<&str> {
        self.indexed_ids().map(|(_, id)| id).collect()
    }

    /// Look up a live unit by exact identifier
    pub fn unit(&self, id: &str) -> Option<TranslatableUnit> {
        self.units().into_iter().find(|unit| unit.id == id)
    }

    /// Number of units that were removed from this document
    pub fn removed_count(&self) -> usize {
        self.units
            .iter()
            .filter(|record| record.state == UnitState::Removed)
            .count()
    }

    /// Whether any unit has been annotated or removed since parsing
    pub fn is_modified(&self) -> bool {
        self.units
            .iter()
            .any(|record| record.state != UnitState::Original)
    }

    /// Replace the note content of a unit. Last write wins.
    pub fn set_note(&mut self, index: UnitIndex, text: &str) -> Result<(), UnitError> {
        let record = self.record_mut(index)?;
        if record.note.is_none() {
            return Err(UnitError::Malformed {
                id: record.id.clone().unwrap_or_default(),
            });
        }
        if record.state != UnitState::Removed {
            record.state = UnitState::Annotated(text.to_string());
        }
        Ok(())
    }

    /// Drop a unit from the document
    pub fn remove_unit(&mut self, index: UnitIndex) -> Result<(), UnitError> {
        self.record_mut(index)?.state = UnitState::Removed;
        Ok(())
    }

    fn record_mut(&mut self, index: UnitIndex) -> Result<&mut UnitRecord, UnitError> {
        self.units
            .get_mut(index.0)
            .ok_or(UnitError::UnknownUnit { index: index.0 })
    }

    /// Serialize the document, applying all recorded mutations
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>, String> {
        let mut skip = vec![false; self.events.len()];
        let mut notes: HashMap<usize, (&UnitRecord, &str)> = HashMap::new();

        for record in &self.units {
            match &record.state {
                UnitState::Original => {}
                UnitState::Removed => {
                    skip[record.span.start..=record.span.end].fill(true);
                    // drop the indentation in front of the unit too
                    if let Some(prev) = record.span.start.checked_sub(1) {
                        if let Event::Text(t) = &self.events[prev] {
                            if is_whitespace(t) {
                                skip[prev] = true;
                            }
                        }
                    }
                }
                UnitState::Annotated(text) => {
                    if let Some(note) = record.note {
                        skip[note.start..=note.end].fill(true);
                        notes.insert(note.start, (record, text.as_str()));
                    }
                }
            }
        }

        let mut writer = Writer::new(Vec::with_capacity(self.events.len() * 16));
        if self.bom {
            writer
                .get_mut()
                .extend_from_slice("\u{feff}".as_bytes());
        }
        for (i, event) in self.events.iter().enumerate() {
            if let Some((record, text)) = notes.get(&i) {
                self.write_note(&mut writer, record, text)?;
                continue;
            }
            if skip[i] {
                continue;
            }
            writer
                .write_event(event.borrow())
                .map_err(|e| e.to_string())?;
        }
        Ok(writer.into_inner())
    }

    /// Serialize into a UTF-8 string
    pub fn to_xml_string(&self) -> Result<String, String> {
        let bytes = self.to_xml_bytes()?;
        String::from_utf8(bytes).map_err(|e| e.to_string())
    }

    fn write_note(
        &self,
        writer: &mut Writer<Vec<u8>>,
        record: &UnitRecord,
        text: &str,
    ) -> Result<(), String> {
        let Some(note) = record.note else {
            return Ok(());
        };
        let start = match &self.events[note.start] {
            Event::Start(e) | Event::Empty(e) => e.borrow(),
            _ => return Err("note span does not start with an element".to_string()),
        };
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        writer
            .write_event(Event::Start(start))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| e.to_string())?;
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn note_of(&self, record: &UnitRecord) -> Option<String> {
        let note = record.note?;
        if let UnitState::Annotated(text) = &record.state {
            return Some(text.clone());
        }
        let mut content = String::new();
        if note.start == note.end {
            return Some(content);
        }
        for event in &self.events[note.start + 1..note.end] {
            match event {
                Event::Text(t) => match t.unescape() {
                    Ok(text) => content.push_str(&text),
                    Err(_) => content.push_str(&String::from_utf8_lossy(t)),
                },
                Event::CData(c) => content.push_str(&String::from_utf8_lossy(c)),
                _ => {}
            }
        }
        Some(content)
    }
}

fn unit_id(start: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    let attr = start.try_get_attribute("id").ok()??;
    let value = attr.unescape_value().ok()?;
    Some(value.into_owned())
}

fn is_whitespace(text: &BytesText<'_>) -> bool {
    text.iter().all(|b| b.is_ascii_whitespace())
}
