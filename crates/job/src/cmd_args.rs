// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command line for the render process on workers.

use crate::host::HostProject;
use farm_core::RenderConfiguration;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `-execcmds="..."`
#[allow(clippy::expect_used)]
static EXECCMDS_DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"-execcmds="[^"]*""#).expect("constant regex pattern is valid"));

/// `-execcmds='...'`
#[allow(clippy::expect_used)]
static EXECCMDS_SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-execcmds='[^']*'").expect("constant regex pattern is valid"));

/// Remove quoted `-execcmds` arguments. Only the queued configuration's exec
/// commands reach render nodes.
pub fn strip_exec_cmds(args: &str) -> String {
    let stripped = EXECCMDS_DOUBLE_QUOTED.replace_all(args, "");
    EXECCMDS_SINGLE_QUOTED.replace_all(&stripped, "").into_owned()
}

fn push_split(args: &mut Vec<String>, s: &str) {
    args.extend(s.split(' ').map(str::to_string));
}

fn strip_logged(args: &str, source: &str) -> String {
    let stripped = strip_exec_cmds(args);
    if stripped != args {
        tracing::warn!(source, "ignoring -execcmds argument; it may not run on render nodes");
    }
    stripped
}

/// Assemble render arguments in order: host inherited, host additional,
/// queued configuration (with `-dpcvars`/`-execcmds`), then `extra`.
///
/// Repeated arguments keep their first position; empty arguments are dropped.
pub fn resolve_command_line(
    host: &HostProject,
    configuration: Option<&RenderConfiguration>,
    extra: Option<&str>,
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    push_split(&mut args, &strip_logged(&host.inherited_command_line, "inherited"));
    push_split(&mut args, &host.additional_command_line);

    if let Some(configuration) = configuration {
        push_split(&mut args, &configuration.command_line_args);
        if !configuration.device_profile_cvars.is_empty() {
            args.push(format!("-dpcvars=\"{}\"", configuration.device_profile_cvars.join(",")));
        }
        if !configuration.exec_cmds.is_empty() {
            args.push(format!("-execcmds=\"{}\"", configuration.exec_cmds.join(",")));
        }
    }

    if let Some(extra) = extra {
        push_split(&mut args, &strip_logged(extra, "extra"));
    }

    let mut seen = HashSet::new();
    args.retain(|arg| !arg.is_empty() && seen.insert(arg.clone()));
    args
}

#[cfg(test)]
#[path = "cmd_args_tests.rs"]
mod tests;
