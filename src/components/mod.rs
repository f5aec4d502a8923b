/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

pub(crate) mod auto_version;
pub(crate) mod board_info;
pub(crate) mod build_size;
