// Copyright 2025 Zhipu AI (Original Python implementation)
// Copyright 2025 ModerRAS (Rust implementation)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Phone Agent
//!
//! AI-powered agent for automating Android phone interactions.
//!
//! This library provides a Rust implementation of the AutoGLM phone agent,
//! which uses vision-language models to understand screen content and
//! automate Android device interactions via ADB.
//!
//! This is a Rust rewrite of [Open-AutoGLM](https://github.com/zai-org/Open-AutoGLM)
//! by Zhipu AI.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mobile_agent::bootstrap::{self, RuntimeConfig};
//! use mobile_agent::config::get_system_prompt;
//! use mobile_agent::events::{EventSink, SseEventSink};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     bootstrap::init();
//!     let config = RuntimeConfig::from_env();
//!     let (adapter, device, llm) = bootstrap::build_components(&config);
//!     let session_config = config.session_config(get_system_prompt(&config.lang));
//!
//!     let (sink, mut lines) = SseEventSink::channel(32);
//!     let sink: std::sync::Arc<dyn EventSink> = std::sync::Arc::new(sink);
//!
//!     let run = mobile_agent::agent::run("open settings", adapter, session_config, device, llm, sink);
//!     tokio::pin!(run);
//!     tokio::select! {
//!         _ = &mut run => {}
//!         Some(line) = lines.recv() => print!("{line}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod adapter;
pub mod adb;
pub mod agent;
pub mod bootstrap;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod events;
pub mod history;
pub mod llm;
pub mod settings;

pub use actions::DEFAULT_COORDINATE_SCALE;
pub use error::AgentError;
pub use settings::AppSettings;
