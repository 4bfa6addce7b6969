//! The simfile (`.sm`) chart parser.
//!
//! A simfile is a tag-based text format `#TAG:param:param:...;` describing a song, its tempo changes and one or more
//! charts of playable notes. This crate turns such text into two structures:
//!
//! - [`sm::timing::TimingData`], the tempo timeline converting between musical position (beat or row) and elapsed
//!   seconds under tempo changes, pauses, delays and time skips.
//! - [`sm::model::NoteGrid`], the sparse per-lane store of note events of each chart.
//!
//! # Usage
//!
//! ```
//! use simfile_rs::sm::{default_config, parse_sm, SmOutput};
//!
//! let source = "#TITLE:Test Song;\n#BPMS:0=120;\n#NOTES:dance-single::Easy:3::\n1000\n0100\n0010\n0001\n;";
//! let SmOutput { song, warnings } = parse_sm(source, default_config());
//! let song = song.expect("the chart is well-formed");
//! assert!(warnings.is_empty());
//! assert_eq!(song.metadata.title, "Test Song");
//! assert_eq!(song.charts[0].notes.len(), 4);
//! ```
//!
//! # Features
//!
//! - `diagnostics` (default): pretty warning reports with `ariadne`.
//! - `serde`: `Serialize`/`Deserialize` for the model types.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod sm;
