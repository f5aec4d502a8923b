/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

pub mod platform;
pub mod symbol;

pub use platform::Platform;
pub use symbol::SizeSummary;
