/*!
 * # vocaslider
 *
 * A Rust library for turning a multilingual vocabulary dictionary into a
 * slideshow video: one image+audio card per phrase and per translation.
 *
 * ## Features
 *
 * - Order-preserving dictionary model loaded from JSON
 * - Pinyin tone decomposition for Mandarin pronunciation breakdowns
 * - Timeline synchronization: one continuous audio track plus a
 *   whole-second-aligned timecode listing, with zero drift between them
 * - Card image rendering and speech synthesis via external tools
 * - Final video compositing from the timecode listing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `dictionary`: Ordered dictionary model
 * - `pinyin`: Tone decomposition for romanized Mandarin
 * - `assets`: Deterministic asset path naming
 * - `timeline`: The timeline synchronization engine
 * - `audio`: Audio track plan, clip probing and encoding
 * - `timecode`: Timecode listing and HH:MM:SS formatting
 * - `render`: Card image rendering
 * - `speech`: Speech synthesis backends:
 *   - `speech::google`: Google Translate TTS client
 *   - `speech::mock`: In-memory synthesizer for tests
 * - `compositor`: Final video compositing
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod assets;
pub mod audio;
pub mod compositor;
pub mod dictionary;
pub mod errors;
pub mod file_utils;
pub mod pinyin;
pub mod render;
pub mod speech;
pub mod timecode;
pub mod timeline;

// Re-export main types for easier usage
pub use app_config::Config;
pub use assets::AssetLocator;
pub use dictionary::{Dictionary, TranslationVariant};
pub use timecode::{TimecodeEntry, TimecodeSheet};
pub use timeline::{Timeline, TimelineBuilder};
pub use errors::{AppError, BuildError, RenderError, SpeechError};
