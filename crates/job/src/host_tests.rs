// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    nested = { "/ws/Projects/Game/Game.uproject", "/ws", "Projects/Game/Game.uproject" },
    trailing_slash_root = { "/ws/Game.uproject", "/ws/", "Game.uproject" },
    windows_separators = { "D:\\ws\\Game\\Game.uproject", "D:\\ws", "Game/Game.uproject" },
    outside_root = { "/other/Game.uproject", "/ws", "other/Game.uproject" },
)]
fn relative_paths(path: &str, root: &str, expected: &str) {
    assert_eq!(relative_to_root(Path::new(path), Path::new(root)), expected);
}

#[test]
fn project_subdirectories() {
    let host = HostProject { project_dir: PathBuf::from("/ws/Game"), ..Default::default() };
    assert_eq!(host.config_dir(), PathBuf::from("/ws/Game/Config"));
    assert_eq!(host.binaries_dir(), PathBuf::from("/ws/Game/Binaries"));
}

#[test]
fn no_dependencies_collects_nothing() {
    assert!(NoDependencies.collect("/Game/Maps/Main").is_empty());
    assert!(NoDependencies.to_filesystem_path("/Game/Maps/Main").is_none());
}
