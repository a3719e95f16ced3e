//! Streaming XMLTV guide parser
//!
//! Scans `<channel>` and `<programme>` elements without building a DOM, so
//! multi-megabyte guide dumps stay cheap. Handles plain XML and
//! gzip-compressed documents, detected by magic bytes rather than file
//! extension. Programme timestamps are kept as raw strings; the schedule
//! core owns their validation.

use std::collections::HashMap;
use std::io::{BufRead, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::GzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::error::{Result, ScheduleError};

/// A programme record as it appears in the guide, timestamps still raw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideProgram {
    pub start: String,
    pub stop: String,
    pub title: String,
    /// Guide-supplied episode label, empty when the element is absent
    pub episode: String,
    /// Programme icon URL from `<icon src=...>`
    pub icon: Option<String>,
}

/// Everything extracted from one guide source.
#[derive(Debug, Clone, Default)]
pub struct GuideData {
    /// Channel id to display name
    pub channels: HashMap<String, String>,
    /// Channel id to programme list, in document order
    pub programs: HashMap<String, Vec<GuideProgram>>,
    /// XML-level errors skipped while scanning
    pub xml_errors: usize,
}

impl GuideData {
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.programs.is_empty()
    }

    pub fn program_count(&self) -> usize {
        self.programs.values().map(Vec::len).sum()
    }
}

/// Which element's text the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScanState {
    Root,
    Channel,
    DisplayName,
    Programme,
    Title,
    EpisodeNum,
}

/// Parse an XMLTV document from a reader.
///
/// Malformed stretches are skipped and counted, never fatal: the element
/// being built is discarded, the state machine resets and scanning resumes
/// at the next event.
pub fn parse_reader<R: BufRead>(reader: R) -> GuideData {
    let mut xml = Reader::from_reader(reader);

    let mut data = GuideData::default();
    let mut buf = Vec::with_capacity(8192);

    let mut state = ScanState::Root;
    // (id, display name) of the channel being built
    let mut channel: Option<(String, String)> = None;
    // (channel id, record) of the programme being built
    let mut programme: Option<(String, GuideProgram)> = None;
    let mut text_buf = String::new();

    loop {
        let position = xml.buffer_position();
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"channel" => {
                    state = ScanState::Channel;
                    let id = get_attribute(e, b"id").unwrap_or_default();
                    channel = Some((id, String::new()));
                }
                b"display-name" if state == ScanState::Channel => {
                    state = ScanState::DisplayName;
                    text_buf.clear();
                }
                b"programme" => {
                    state = ScanState::Programme;
                    let channel_id = get_attribute(e, b"channel").unwrap_or_default();
                    let record = GuideProgram {
                        start: get_attribute(e, b"start").unwrap_or_default(),
                        stop: get_attribute(e, b"stop").unwrap_or_default(),
                        ..GuideProgram::default()
                    };
                    programme = Some((channel_id, record));
                }
                b"title" if state == ScanState::Programme => {
                    state = ScanState::Title;
                    text_buf.clear();
                }
                b"episode-num" if state == ScanState::Programme => {
                    state = ScanState::EpisodeNum;
                    text_buf.clear();
                }
                b"icon" if state == ScanState::Programme => {
                    if let (Some(src), Some((_, record))) =
                        (get_attribute(e, b"src"), programme.as_mut())
                    {
                        record.icon = Some(src);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => match state {
                ScanState::DisplayName | ScanState::Title | ScanState::EpisodeNum => {
                    match e.decode() {
                        Ok(text) => text_buf.push_str(&text),
                        Err(_) => data.xml_errors += 1,
                    }
                }
                _ => {}
            },
            Ok(Event::GeneralRef(e)) => match state {
                ScanState::DisplayName | ScanState::Title | ScanState::EpisodeNum => {
                    match e.resolve_char_ref() {
                        Ok(Some(ch)) => text_buf.push(ch),
                        Ok(None) => {
                            match std::str::from_utf8(&e)
                                .ok()
                                .and_then(quick_xml::escape::resolve_predefined_entity)
                            {
                                Some(resolved) => text_buf.push_str(resolved),
                                None => data.xml_errors += 1,
                            }
                        }
                        Err(_) => data.xml_errors += 1,
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"channel" => {
                    if let Some((id, name)) = channel.take() {
                        if !id.is_empty() && !name.is_empty() {
                            data.channels.insert(id, name);
                        }
                    }
                    state = ScanState::Root;
                }
                b"display-name" => {
                    if let Some((_, name)) = channel.as_mut() {
                        // Keep the first display name; later ones are aliases.
                        if name.is_empty() {
                            *name = text_buf.trim().to_string();
                        }
                    }
                    state = ScanState::Channel;
                }
                b"programme" => {
                    if let Some((channel_id, record)) = programme.take() {
                        if !channel_id.is_empty() && !record.title.is_empty() {
                            data.programs.entry(channel_id).or_default().push(record);
                        }
                    }
                    state = ScanState::Root;
                }
                b"title" => {
                    if let Some((_, record)) = programme.as_mut() {
                        record.title = text_buf.trim().to_string();
                    }
                    state = ScanState::Programme;
                }
                b"episode-num" => {
                    if let Some((_, record)) = programme.as_mut() {
                        record.episode = text_buf.trim().to_string();
                    }
                    state = ScanState::Programme;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                data.xml_errors += 1;
                debug!("xml error at byte {position}: {err}");
                channel = None;
                programme = None;
                state = ScanState::Root;
                text_buf.clear();
            }
            _ => {}
        }
        buf.clear();
    }

    data
}

/// Load a guide document from disk, decompressing when the gzip magic bytes
/// (`1f 8b`) lead the file. A source that cannot be read, or that yields
/// neither channels nor programmes, is reported as unavailable.
pub fn load_file(path: &Path) -> Result<GuideData> {
    let unavailable = |reason: String| ScheduleError::SourceUnavailable {
        path: path.to_path_buf(),
        reason,
    };

    let file = std::fs::File::open(path).map_err(|e| unavailable(e.to_string()))?;
    let mut reader = std::io::BufReader::with_capacity(64 * 1024, file);

    let mut magic = [0u8; 2];
    reader
        .read_exact(&mut magic)
        .map_err(|e| unavailable(e.to_string()))?;
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| unavailable(e.to_string()))?;

    let data = if magic == [0x1f, 0x8b] {
        let decoder = GzDecoder::new(reader);
        parse_reader(std::io::BufReader::with_capacity(64 * 1024, decoder))
    } else {
        parse_reader(reader)
    };

    if data.is_empty() {
        return Err(unavailable("no channels or programmes found".to_string()));
    }
    Ok(data)
}

fn get_attribute(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tv>
  <channel id="axn.id">
    <display-name>AXN HD</display-name>
  </channel>
  <programme start="20260204003000 +0700" stop="20260204013000 +0700" channel="axn.id">
    <title>Drama Seru - Eps.12</title>
    <icon src="https://example.com/drama.svg"/>
  </programme>
  <programme start="20260204013000 +0700" stop="20260204023000 +0700" channel="axn.id">
    <title>News &amp; Views</title>
    <episode-num>S01E04</episode-num>
  </programme>
</tv>"#;

    fn parse(xml: &str) -> GuideData {
        parse_reader(xml.as_bytes())
    }

    #[test]
    fn test_extracts_channels_and_programmes() {
        let data = parse(SAMPLE);
        assert_eq!(data.channels.get("axn.id").unwrap(), "AXN HD");

        let programs = data.programs.get("axn.id").unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].title, "Drama Seru - Eps.12");
        assert_eq!(programs[0].start, "20260204003000 +0700");
        assert_eq!(programs[0].icon.as_deref(), Some("https://example.com/drama.svg"));
        assert_eq!(programs[1].title, "News & Views");
        assert_eq!(programs[1].episode, "S01E04");
    }

    #[test]
    fn test_timestamps_stay_raw() {
        // Validation belongs to the schedule core, not the parser.
        let data = parse(
            r#"<tv><programme start="not a time" stop="also bad" channel="c">
               <title>Still Parsed</title></programme></tv>"#,
        );
        assert_eq!(data.programs.get("c").unwrap()[0].start, "not a time");
    }

    #[test]
    fn test_untitled_programme_is_dropped() {
        let data = parse(
            r#"<tv><programme start="20260204003000 +0700" stop="20260204013000 +0700" channel="c"/></tv>"#,
        );
        assert!(data.programs.is_empty());
    }

    #[test]
    fn test_programme_without_channel_attribute_is_dropped() {
        let data = parse(
            r#"<tv><programme start="20260204003000 +0700" stop="20260204013000 +0700">
               <title>Orphan</title></programme></tv>"#,
        );
        assert!(data.programs.is_empty());
    }

    #[test]
    fn test_later_display_names_do_not_overwrite_the_first() {
        let data = parse(
            r#"<tv><channel id="c"><display-name>Main</display-name>
               <display-name>Alias</display-name></channel></tv>"#,
        );
        assert_eq!(data.channels.get("c").unwrap(), "Main");
    }

    #[test]
    fn test_empty_document_loads_as_unavailable() {
        let path = temp_path("empty.xml");
        std::fs::write(&path, "<tv></tv>").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ScheduleError::SourceUnavailable { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = load_file(Path::new("/nonexistent/guide.xml")).unwrap_err();
        assert!(matches!(err, ScheduleError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_plain_file_roundtrips() {
        let path = temp_path("plain.xml");
        std::fs::write(&path, SAMPLE).unwrap();
        let data = load_file(&path).unwrap();
        assert_eq!(data.program_count(), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_gzip_file_is_detected_by_magic_bytes() {
        // Deliberately misleading extension: only the magic bytes matter.
        let path = temp_path("compressed.xml");
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let data = load_file(&path).unwrap();
        assert_eq!(data.channels.len(), 1);
        assert_eq!(data.program_count(), 2);
        std::fs::remove_file(&path).ok();
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("epg_schedule_test_{}_{}", std::process::id(), name))
    }
}
