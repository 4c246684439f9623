//! End-to-end pipeline tests against in-memory services.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use podgen::*;
use podgen_minimax::TaskStatus;
use tokio::sync::Mutex;

const SCRIPT: &str = "\
# 今日のポッドキャスト
**アキラ:** こんにちは、皆さん！今日はAIのお話です。
**ユウキ:** こんにちは。最近のニュースは面白いですね。
**アキラ:** ユウキさん、それってどういう意味ですか？
---
**ユウキ:** 要するに、仕事のやり方が変わるということです。";

struct ScriptedChat {
    reply: String,
    requests: Mutex<Vec<Completion>>,
}

impl ScriptedChat {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatModel for ScriptedChat {
    async fn complete(&self, request: &Completion) -> Result<String> {
        self.requests.lock().await.push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Fails every call made with `broken_voice`; other voices get one byte of
/// audio per call, numbered by call order.
struct FlakySpeech {
    broken_voice: String,
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechBackend for FlakySpeech {
    async fn synthesize(&self, _text: &str, voice_id: &str) -> Result<SpeechClip> {
        let mut calls = self.calls.lock().await;
        calls.push(voice_id.to_string());
        if voice_id == self.broken_voice {
            return Err(Error::upstream("minimax", "voice unavailable"));
        }
        Ok(SpeechClip {
            audio: vec![calls.len() as u8],
            duration_ms: Some(2500),
        })
    }
}

fn podcaster(llm: Arc<ScriptedChat>, speech: Arc<FlakySpeech>) -> Podcaster {
    let synth =
        Synthesizer::new(speech).with_policy(RetryPolicy::new(2, Duration::from_millis(10)));
    let orchestrator =
        SegmentOrchestrator::new(Arc::new(synth)).with_pacing(Duration::from_millis(10));
    Podcaster::new(llm, VoiceRoster::default())
        .unwrap()
        .with_voicing(orchestrator, AudioMerger::new(None))
}

#[tokio::test(start_paused = true)]
async fn episode_is_voiced_with_fallback() {
    let speech = Arc::new(FlakySpeech {
        broken_voice: VOICE_JA_MALE_HOST.to_string(),
        calls: Mutex::new(Vec::new()),
    });
    let episode = podcaster(ScriptedChat::new(SCRIPT), speech.clone())
        .produce("AIに関するニュース記事の本文")
        .await
        .unwrap();

    assert_eq!(episode.dialogue.len(), 4);
    let EpisodeAudio::Voiced { report, final_audio } = episode.audio else {
        panic!("expected voiced episode");
    };
    assert_eq!(report.segments.len(), 4);
    assert_eq!(report.successes, 4);
    assert_eq!(report.total_duration, 12);

    // Yuuki's voice is broken: both of its lines come from the fallback.
    assert_eq!(report.segments[0].voice_id, VOICE_JA_FEMALE);
    assert_eq!(report.segments[1].voice_id, FALLBACK_VOICE_ID);
    assert_eq!(report.segments[3].voice_id, FALLBACK_VOICE_ID);

    // 1 + (2 broken + 1) + 1 + (2 broken + 1)
    assert_eq!(speech.calls.lock().await.len(), 8);

    let merged = decode_data_uri(&final_audio.unwrap()).unwrap();
    assert_eq!(merged, vec![1, 4, 5, 8]);
}

#[tokio::test]
async fn unvoiced_podcaster_skips_audio() {
    let podcaster = Podcaster::new(ScriptedChat::new(SCRIPT), VoiceRoster::default()).unwrap();
    assert!(!podcaster.is_voiced());

    let episode = podcaster.produce("本文").await.unwrap();
    assert_eq!(episode.dialogue.len(), 4);
    assert!(matches!(episode.audio, EpisodeAudio::Skipped(_)));
}

#[tokio::test]
async fn script_without_dialogue_is_an_error() {
    let llm = ScriptedChat::new("これはナレーションだけの原稿で、話者の名前が一切ありません。");
    let err = Podcaster::new(llm, VoiceRoster::default())
        .unwrap()
        .produce("本文")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NoDialogue { .. }));
}

struct ScriptedTask {
    submit: Result<String>,
    statuses: Mutex<Vec<TaskStatus>>,
    polls: Mutex<u32>,
}

#[async_trait]
impl LongformSpeech for ScriptedTask {
    async fn submit(&self, _text: &str, _voice_id: &str) -> Result<String> {
        match &self.submit {
            Ok(id) => Ok(id.clone()),
            Err(_) => Err(Error::upstream("minimax", "quota exceeded")),
        }
    }

    async fn status(&self, _task_id: &str) -> Result<TaskReport> {
        *self.polls.lock().await += 1;
        let mut statuses = self.statuses.lock().await;
        let status = if statuses.is_empty() {
            TaskStatus::Processing
        } else {
            statuses.remove(0)
        };
        Ok(TaskReport {
            audio_url: status.is_success().then(|| "https://files.example/a.mp3".to_string()),
            status,
            error_message: None,
        })
    }
}

fn task(submit: Result<String>, statuses: Vec<TaskStatus>) -> Arc<ScriptedTask> {
    Arc::new(ScriptedTask {
        submit,
        statuses: Mutex::new(statuses),
        polls: Mutex::new(0),
    })
}

#[tokio::test(start_paused = true)]
async fn narration_polls_until_success() {
    let speech = task(
        Ok("task-1".to_string()),
        vec![TaskStatus::Processing, TaskStatus::Processing, TaskStatus::Success],
    );
    let narration = Narrator::new(ScriptedChat::new("ナレーション原稿"))
        .with_speech(speech.clone())
        .narrate("本文", "educational", "female")
        .await
        .unwrap();

    assert_eq!(narration.script, "ナレーション原稿");
    assert_eq!(narration.voice.voice_id, VOICE_JA_FEMALE);
    assert_eq!(narration.task_id.as_deref(), Some("task-1"));
    assert_eq!(narration.audio_url.as_deref(), Some("https://files.example/a.mp3"));
    assert_eq!(*speech.polls.lock().await, 3);
}

#[tokio::test(start_paused = true)]
async fn narration_stops_on_failed_task() {
    let speech = task(Ok("task-2".to_string()), vec![TaskStatus::Failed]);
    let narration = Narrator::new(ScriptedChat::new("原稿"))
        .with_speech(speech.clone())
        .narrate("本文", "comedy", "male")
        .await
        .unwrap();

    assert!(!narration.voice.from_mapping);
    assert_eq!(narration.task_id.as_deref(), Some("task-2"));
    assert!(narration.audio_url.is_none());
    assert_eq!(*speech.polls.lock().await, 1);
}

#[tokio::test(start_paused = true)]
async fn narration_gives_up_after_poll_budget() {
    let speech = task(Ok("task-3".to_string()), Vec::new());
    let start = tokio::time::Instant::now();
    let narration = Narrator::new(ScriptedChat::new("原稿"))
        .with_speech(speech.clone())
        .narrate("本文", "narrative", "male")
        .await
        .unwrap();

    assert!(narration.audio_url.is_none());
    assert_eq!(*speech.polls.lock().await, 20);
    assert_eq!(start.elapsed(), Duration::from_secs(160));
}

#[tokio::test]
async fn narration_survives_submit_failure() {
    let speech = task(Err(Error::EmptyResponse("minimax")), Vec::new());
    let narration = Narrator::new(ScriptedChat::new("原稿"))
        .with_speech(speech.clone())
        .narrate("本文", "interview", "male")
        .await
        .unwrap();

    assert!(narration.task_id.is_none());
    assert!(narration.audio_url.is_none());
    assert_eq!(*speech.polls.lock().await, 0);
}
