// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use farm_core::RenderRequestBuilder;
use std::path::PathBuf;
use yare::parameterized;

fn context() -> PathContext {
    let request = RenderRequestBuilder::default()
        .job_name("Trailer")
        .sequence_path("/Game/Cinematics/Shot010.Shot010")
        .map_path("/Game/Maps/Forest")
        .build();
    let host = HostProject { project_dir: PathBuf::from("/work/Game"), ..Default::default() };
    PathContext::from_request(&request, &host)
}

#[parameterized(
    all_tokens = {
        "{project_dir}/Saved/{job_name}/{level}/{sequence}/",
        "/work/Game/Saved/Trailer/Forest/Shot010"
    },
    map_alias = { "/out/{map}", "/out/Forest" },
    unknown_token_kept = { "/out/{frame_number}/", "/out/{frame_number}" },
    no_tokens = { "/out/renders///", "/out/renders" },
)]
fn resolves(path: &str, expected: &str) {
    assert_eq!(resolve_output_directory(path, &context()).unwrap(), expected);
}

#[parameterized(
    quote = { "/out/\"x\"" },
    pipe = { "/out/a|b" },
    star = { "/out/*" },
    question = { "/out/a?" },
    angle = { "/out/<a>" },
)]
fn rejects_invalid_characters(path: &str) {
    let err = resolve_output_directory(path, &context()).unwrap_err();
    assert!(matches!(err, JobError::InvalidPathCharacters(p) if p == path));
}

#[test]
fn plain_paths_are_valid() {
    assert!(validate_path_characters("C:/renders/{job_name}").is_ok());
}
