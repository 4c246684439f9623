//! Merging segment clips into one audio file.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{
    error::Result,
    orchestrator::SynthesisReport,
    synth::{audio_data_uri, decode_data_uri},
};

/// Concatenates mp3 clips, losslessly through ffmpeg's concat demuxer when
/// ffmpeg is available and by plain byte concatenation otherwise.
#[derive(Debug, Clone, Default)]
pub struct AudioMerger {
    ffmpeg: Option<PathBuf>,
}

impl AudioMerger {
    /// Uses exactly `ffmpeg`, or byte concatenation when `None`.
    pub fn new(ffmpeg: Option<PathBuf>) -> Self {
        Self { ffmpeg }
    }

    /// Uses `configured` if set, else looks for `ffmpeg` on `PATH`.
    pub fn detect(configured: Option<PathBuf>) -> Self {
        let ffmpeg = configured.or_else(|| find_in_path("ffmpeg"));
        match &ffmpeg {
            Some(path) => info!(ffmpeg = %path.display(), "audio merge via ffmpeg"),
            None => info!("ffmpeg not found, audio merge via byte concatenation"),
        }
        Self { ffmpeg }
    }

    /// Merges `clips` in order. Never fails: any ffmpeg problem falls back
    /// to byte concatenation.
    pub async fn merge(&self, clips: &[Vec<u8>]) -> Vec<u8> {
        let Some(ffmpeg) = &self.ffmpeg else {
            return concat(clips);
        };
        match merge_with_ffmpeg(ffmpeg, clips).await {
            Ok(merged) => {
                debug!(clips = clips.len(), bytes = merged.len(), "merged with ffmpeg");
                merged
            }
            Err(e) => {
                warn!(error = %e, "ffmpeg merge failed, concatenating bytes");
                concat(clips)
            }
        }
    }

    /// Merges the voiced segments of `report` into one data URI, or `None`
    /// when no segment carries audio.
    pub async fn merge_report(&self, report: &SynthesisReport) -> Option<String> {
        let clips: Vec<Vec<u8>> = report
            .voiced()
            .filter_map(|s| s.audio_url.as_deref().and_then(decode_data_uri))
            .collect();
        if clips.is_empty() {
            return None;
        }
        Some(audio_data_uri(&self.merge(&clips).await))
    }
}

/// Byte concatenation of `clips` in order.
pub fn concat(clips: &[Vec<u8>]) -> Vec<u8> {
    clips.concat()
}

async fn merge_with_ffmpeg(ffmpeg: &Path, clips: &[Vec<u8>]) -> Result<Vec<u8>> {
    let dir = tempfile::Builder::new().prefix("podgen-merge-").tempdir()?;

    let mut manifest = String::new();
    for (i, clip) in clips.iter().enumerate() {
        let path = dir.path().join(format!("seg_{}.mp3", i));
        tokio::fs::write(&path, clip).await?;
        manifest.push_str(&format!("file '{}'\n", escape_manifest_path(&path)));
    }
    let list = dir.path().join("inputs.txt");
    tokio::fs::write(&list, manifest).await?;

    let out = dir.path().join("output.mp3");
    let output = Command::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "concat", "-safe", "0", "-i"])
        .arg(&list)
        .args(["-c", "copy"])
        .arg(&out)
        .kill_on_drop(true)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("ffmpeg exited with {}: {}", output.status, stderr.trim()).into());
    }

    Ok(tokio::fs::read(&out).await?)
}

// The concat demuxer reads single-quoted paths; a quote is written as '\''.
fn escape_manifest_path(path: &Path) -> String {
    path.display().to_string().replace('\'', r"'\''")
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::AudioSegmentResult;

    fn voiced(seq: usize, audio: Option<&[u8]>) -> AudioSegmentResult {
        AudioSegmentResult {
            segment_id: seq,
            speaker: "アキラ".to_string(),
            text: "テスト用のセリフ".to_string(),
            audio_url: audio.map(audio_data_uri),
            voice_id: "v".to_string(),
            duration: 1,
            success: audio.is_some(),
        }
    }

    #[tokio::test]
    async fn without_ffmpeg_concatenates_in_order() {
        let merger = AudioMerger::new(None);
        let merged = merger.merge(&[b"first".to_vec(), b"second".to_vec()]).await;
        assert_eq!(merged, b"firstsecond");
    }

    #[tokio::test]
    async fn broken_ffmpeg_falls_back_to_concat() {
        let dir = tempfile::tempdir().unwrap();
        let merger = AudioMerger::new(Some(dir.path().join("no-such-ffmpeg")));
        let merged = merger.merge(&[vec![1, 2], vec![3]]).await;
        assert_eq!(merged, vec![1, 2, 3]);
    }

    // Stands in for ffmpeg: appends every manifest entry plus a `|` to the
    // output path and records the working directory in `workdir_log`.
    #[cfg(unix)]
    fn fake_ffmpeg(dir: &Path, workdir_log: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("ffmpeg");
        let body = format!(
            r#"#!/bin/sh
prev=""
for arg in "$@"; do
  if [ "$prev" = "-i" ]; then list="$arg"; fi
  prev="$arg"
done
out="$prev"
dirname "$list" > '{}'
: > "$out"
sed -n "s/^file '\(.*\)'$/\1/p" "$list" | while IFS= read -r f; do
  cat "$f" >> "$out"
  printf '|' >> "$out"
done
"#,
            workdir_log.display()
        );
        std::fs::write(&script, body).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn ffmpeg_merges_manifest_in_order_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let workdir_log = dir.path().join("workdir");
        let merger = AudioMerger::new(Some(fake_ffmpeg(dir.path(), &workdir_log)));

        let merged = merger.merge(&[b"AA".to_vec(), b"BB".to_vec()]).await;
        assert_eq!(merged, b"AA|BB|");

        let workdir = PathBuf::from(std::fs::read_to_string(&workdir_log).unwrap().trim());
        let name = workdir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("podgen-merge-"), "{}", name);
        assert!(!workdir.exists());
    }

    #[tokio::test]
    async fn report_merge_skips_failed_segments() {
        let report = SynthesisReport::from_segments(vec![
            voiced(1, Some(&b"aa"[..])),
            voiced(2, None),
            voiced(3, Some(&b"bb"[..])),
        ]);
        let uri = AudioMerger::new(None).merge_report(&report).await.unwrap();
        assert_eq!(decode_data_uri(&uri).unwrap(), b"aabb");
    }

    #[tokio::test]
    async fn report_without_audio_is_not_merged() {
        let report = SynthesisReport::from_segments(vec![voiced(1, None)]);
        assert!(AudioMerger::new(None).merge_report(&report).await.is_none());
    }

    #[test]
    fn manifest_paths_escape_quotes() {
        assert_eq!(
            escape_manifest_path(Path::new("/tmp/it's.mp3")),
            r"/tmp/it'\''s.mp3"
        );
    }
}
