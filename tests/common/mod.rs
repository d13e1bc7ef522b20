//! Shared test harness for integration tests.
//!
//! Provides stand-in ffmpeg/ffprobe executables written as shell scripts,
//! so the export pipeline can be exercised without a transcoder install.
//! Unix only, the scripts rely on /bin/sh and the executable bit.

// Not every test binary uses every helper
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Stderr banner the diagnostic probe has to parse, trimmed from a real
/// transcoder run. Reports a 30 minute input.
pub const BANNER_30_MIN: &str = "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'input.mp4':
  Metadata:
    major_brand     : isom
    minor_version   : 512
  Duration: 00:30:00.00, start: 0.000000, bitrate: 1024 kb/s
  Stream #0:0[0x1](und): Video: h264 (High), yuv420p, 1920x1080, 30 fps";

/// Content the fake transcoder writes into every exported segment.
pub const SEGMENT_CONTENT: &str = "fake segment data";

/// ffprobe JSON payload reporting the given duration.
pub fn probe_payload(duration: &str) -> String {
    format!(r#"{{"format": {{"filename": "input.mp4", "duration": "{duration}"}}}}"#)
}

/// Write a fake ffmpeg into `dir` and return its path.
///
/// The script answers the `-version` preflight, prints `banner` on stderr
/// for the null-target probe invocation, and creates the output file for
/// export invocations. An export whose argv matches one of `fail_patterns`
/// writes a diagnostic to stderr and exits 187 without creating anything.
pub fn write_fake_ffmpeg(dir: &Path, banner: &str, fail_patterns: &[&str]) -> PathBuf {
    let arms = if fail_patterns.is_empty() {
        // Sentinel no argv line ever contains, an empty pattern would match everything
        "*\"@@none@@\"*".to_string()
    } else {
        fail_patterns
            .iter()
            .map(|p| format!("*\"{p}\"*"))
            .collect::<Vec<_>>()
            .join("|")
    };

    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers"
    exit 0
fi
case "$*" in
    *"-f null"*)
        printf '%s\n' "{banner}" >&2
        exit 0
        ;;
esac
case "$*" in
    {arms})
        echo "Error while decoding stream #0:0: Invalid data found when processing input" >&2
        exit 187
        ;;
esac
# The output path sits second to last, right before the trailing -y
for arg in "$@"; do
    out="$prev"
    prev="$arg"
done
printf '%s' "{segment}" > "$out"
exit 0
"#,
        banner = banner,
        arms = arms,
        segment = SEGMENT_CONTENT,
    );
    write_tool(dir, "ffmpeg", &script)
}

/// Fake ffmpeg whose version query fails, for preflight tests.
pub fn write_broken_ffmpeg(dir: &Path) -> PathBuf {
    let script = r#"#!/bin/sh
echo "ffmpeg: error while loading shared libraries: libavcodec.so.60" >&2
exit 127
"#;
    write_tool(dir, "ffmpeg", script)
}

/// Fake ffmpeg that passes preflight but sleeps on every other
/// invocation, for watchdog tests.
pub fn write_hanging_ffmpeg(dir: &Path) -> PathBuf {
    let script = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version 6.1.1"
    exit 0
fi
echo "frame=1 fps=0.0 q=0.0 size=0kB time=00:00:00.00 bitrate=N/A" >&2
# exec so the watchdog's kill reaps the sleeper itself, not just the shell
exec sleep 30
"#;
    write_tool(dir, "ffmpeg", script)
}

/// Fake ffmpeg that floods stderr before exporting: one invalid UTF-8
/// byte sequence up front, then enough progress chatter to overflow a
/// pipe buffer, then the output file and a clean exit.
pub fn write_noisy_ffmpeg(dir: &Path) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers"
    exit 0
fi
printf 'Metadata tag: \342\050\241 (unreadable)\n' >&2
i=0
while [ $i -lt 2000 ]; do
    echo "frame=  $i fps=25 q=28.0 size=     256kB time=00:00:01.00 bitrate= 418.0kbits/s speed=1.2x" >&2
    i=$((i+1))
done
# The output path sits second to last, right before the trailing -y
for arg in "$@"; do
    out="$prev"
    prev="$arg"
done
printf '%s' "{segment}" > "$out"
exit 0
"#,
        segment = SEGMENT_CONTENT,
    );
    write_tool(dir, "ffmpeg", &script)
}

/// Write a fake ffprobe into `dir` that prints `payload` for any query.
pub fn write_fake_ffprobe(dir: &Path, payload: &str) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffprobe version 6.1.1"
    exit 0
fi
printf '%s' '{payload}'
exit 0
"#
    );
    write_tool(dir, "ffprobe", &script)
}

/// Fake ffprobe that fails every query with a read error.
pub fn write_broken_ffprobe(dir: &Path) -> PathBuf {
    let script = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo "ffprobe version 6.1.1"
    exit 0
fi
echo "input.mp4: Invalid data found when processing input" >&2
exit 1
"#;
    write_tool(dir, "ffprobe", script)
}

fn write_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).expect("failed to write fake tool");
    let mut perms = fs::metadata(&path)
        .expect("failed to stat fake tool")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("failed to chmod fake tool");
    path
}
