//! Lectura Server Library
//!
//! Plain-text reading with dictionary-enriched annotations: upload an
//! article, select a word while reading, and the capture flow stores a
//! highlight with phonetics, definitions, and pronunciation audio that
//! renders back into the text.
//!
//! The crate is a library so the renderer and the selection resolver can
//! be benchmarked and integration-tested; the server binary is in main.rs.
//!
//! # Modules
//!
//! - `selection`: selection gesture to char-offset resolution
//! - `render`: annotated article rendering (splice and tokenized strategies)
//! - `annotations`: annotation data model, validation, persistence
//! - `dictionary`: word lookup and audio synthesis via a chat-completion API
//! - `playback`: pronunciation playback plans and client playback state
//! - `extract`: web page to plain-text article extraction

pub mod annotations;
pub mod config;
pub mod db;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod playback;
pub mod render;
pub mod routes;
pub mod selection;
pub mod state;
pub mod storage;
pub mod text;
