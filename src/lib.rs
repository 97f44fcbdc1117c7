/*
 * @file lib.rs
 * @brief Folio library root
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Folio - the interaction engine of a single-page portfolio site.
//!
//! This library provides:
//! - a section navigator with wrap-around paging and synced nav links
//! - a keyword-matching assistant with a conversation log and speech output
//! - theme persistence, a typewriter headline and scroll reveal state
//!
//! # Example
//! ```no_run
//! use anyhow::Result;
//! use folio::{app::Portfolio, config, shell};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     dotenv::dotenv().ok();
//!     let config = config::load_app_config(std::path::Path::new(config::CONFIG_PATH));
//!     shell::run_shell(Portfolio::from_config(&config)?).await
//! }
//! ```

pub mod app;
pub mod assistant;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod navigator;
pub mod recognition;
pub mod reveal;
pub mod shell;
pub mod speech;
pub mod theme;
pub mod typewriter;
