//! Transcoder export argument construction

use std::path::{Path, PathBuf};

use crate::engine::{EncodingSettings, ExportMode};
use crate::planner::SegmentSpec;

/// Argument vector for one segment export
///
/// Renders the fixed invocation shape
/// `-i <input> -ss <start> -t <len> <mode args> -avoid_negative_ts 1
/// <output> -y`: seek and duration are placed after the input so the
/// demuxer decodes up to the seek point, and the trailing `-y` makes the
/// transcoder silently replace an existing destination file.
#[derive(Debug, Clone)]
pub struct ExportCommand {
    input: PathBuf,
    output: PathBuf,
    start: f64,
    length: f64,
    mode: ExportMode,
    encoding: EncodingSettings,
}

impl ExportCommand {
    pub fn new(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        spec: &SegmentSpec,
        mode: ExportMode,
        encoding: EncodingSettings,
    ) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            start: spec.start,
            length: spec.length(),
            mode,
            encoding,
        }
    }

    /// Build the argument vector in invocation order.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "-i".to_string(),
            self.input.to_string_lossy().to_string(),
            "-ss".to_string(),
            format!("{:.3}", self.start),
            "-t".to_string(),
            format!("{:.3}", self.length),
        ];

        match self.mode {
            ExportMode::Reencode => {
                args.push("-c:v".to_string());
                args.push(self.encoding.video_codec.clone());
                args.push("-c:a".to_string());
                args.push(self.encoding.audio_codec.clone());
            }
            ExportMode::Copy => {
                args.push("-c".to_string());
                args.push("copy".to_string());
            }
        }

        args.push("-avoid_negative_ts".to_string());
        args.push("1".to_string());
        args.push(self.output.to_string_lossy().to_string());
        args.push("-y".to_string());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(index: u32, start: f64, end: f64) -> SegmentSpec {
        SegmentSpec { index, start, end }
    }

    #[test]
    fn reencode_args_follow_invocation_order() {
        let cmd = ExportCommand::new(
            "lecture.mp4",
            "clips/clip_002_15min-30min.mp4",
            &spec(2, 900.0, 1800.0),
            ExportMode::Reencode,
            EncodingSettings::default(),
        );

        assert_eq!(
            cmd.build_args(),
            vec![
                "-i",
                "lecture.mp4",
                "-ss",
                "900.000",
                "-t",
                "900.000",
                "-c:v",
                "libx264",
                "-c:a",
                "aac",
                "-avoid_negative_ts",
                "1",
                "clips/clip_002_15min-30min.mp4",
                "-y",
            ]
        );
    }

    #[test]
    fn copy_args_use_single_codec_flag() {
        let cmd = ExportCommand::new(
            "short.mp4",
            "clips/clip_001.mp4",
            &spec(1, 0.0, 59.0),
            ExportMode::Copy,
            EncodingSettings::default(),
        );

        let args = cmd.build_args();
        assert!(args.windows(2).any(|w| w == ["-c", "copy"]));
        assert!(!args.contains(&"-c:v".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("-y"));
    }

    #[test]
    fn short_final_segment_gets_its_real_length() {
        let cmd = ExportCommand::new(
            "long.mp4",
            "clips/clip_063.mp4",
            &spec(63, 3658.0, 3661.0),
            ExportMode::Copy,
            EncodingSettings::default(),
        );

        let args = cmd.build_args();
        let t_position = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t_position + 1], "3.000");
    }
}
