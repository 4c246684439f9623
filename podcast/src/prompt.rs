//! LLM prompts for script generation and content analysis.

use minijinja::{context, Environment};

use super::{error::Result, service::Completion, voice::VoiceRoster};

/// Source content is cut to this many characters before dialogue prompting.
pub const DIALOGUE_SOURCE_CHARS: usize = 3000;

pub const DIALOGUE_SYSTEM_TEMPLATE: &str = r#"あなたは日本語ポッドキャスト専門家です。2人のホスト（{{ akira.name }}と{{ yuuki.name }}）による自然で魅力的な対話形式のポッドキャストスクリプトを作成してください。

## キャラクター設定
- **{{ akira.name }}（女性）**: {{ akira.personality }}
- **{{ yuuki.name }}（男性）**: {{ yuuki.personality }}

## スタイルガイド
- ニュース本文を「朗読」せず、必ず二人の意見や感想を混ぜる
- **二人はしばしば意見が食い違い、議論やツッコミを交わす**（全部互いに同意しない）
- {{ akira.name }}は素朴な疑問や可愛いリアクションを挟む
- {{ yuuki.name }}は経験談や批判的視点で掘り下げる
- 一人あたり 2〜4 文でテンポ良く交互に話す

## 重要な形式要求
- 各行は必ず次のいずれかで始めること（先頭以外に発言者名を含めない）
  - **{{ akira.name }}:** スピーチ内容…
  - **{{ yuuki.name }}:** スピーチ内容…
- 星印とコロン（または全角コロン）以外の記号を発言者名前の前後に置かない
- セリフ内に相手の名前を再度書かない
- マークダウンや引用記号を使わない
- 自然な掛け合い（交互に話す）
- 読み上げ時間: 約3-5分（800-1200字程度）
- 丁寧語を中心に、親しみやすい口調

## 構造要求
1. **オープニング**: 挨拶と今日のトピック紹介
2. **メイン内容**: 内容の詳細な議論（対話形式）
3. **クロージング**: まとめと感想

絶対に「**{{ akira.name }}:**」「**{{ yuuki.name }}:**」の形式で発言者を区別してください。

例:
**{{ akira.name }}:** こんにちは、皆さん！
**{{ yuuki.name }}:** こんにちは。準備はいい？
**{{ akira.name }}:** もちろんです。それでは始めましょう。"#;

pub const DIALOGUE_USER_TEMPLATE: &str = r#"以下の内容を2人のホストによる対話形式の日本語ポッドキャストスクリプトに変換してください：

{{ content }}"#;

pub const NARRATION_SYSTEM_TEMPLATE: &str = r#"あなたは日本語ポッドキャスト専門家です。自然で魅力的な日本語ポッドキャストスクリプトを作成してください。

スタイル: {{ style }}
音声タイプ: {{ voice }}

要求：
1. 敬語（丁寧語）を適切に使用
2. ポッドキャストに適した口語表現に変換
3. 自然な間や停顿を含める（、や。で適切な間を作る）
4. 聴衆との対話要素を含む（「皆さん」「いかがでしょうか」など）
5. 開始、主要内容、結語の構造を持つ
6. 読み上げやすい文章構造
7. 約10-15分の長さ（約2000-3000字）

特別注意：
- 読み上げ時に自然に聞こえるよう、漢字にふりがなが必要な場合は括弧で追記
- 数字は読み方を明確に（例：2024年→二千二十四年）
- 専門用語は説明を付加"#;

pub const NARRATION_USER_TEMPLATE: &str = r#"以下の内容を日本語ポッドキャストスクリプトに変換してください：

{{ content }}"#;

pub const TWEET_SYSTEM_TEMPLATE: &str = "分析Twitter/X帖子并生成适合{{ akira.name }}（女性）和{{ yuuki.name }}（男性）双人日语播客讨论的详细内容。提供3500-4500字的丰富背景信息和讨论素材。";

pub const TWEET_USER_TEMPLATE: &str = r#"请分析这个Twitter/X链接：{{ url }}

生成适合{{ akira.name }}（女性）和{{ yuuki.name }}（男性）双人播客对话的丰富内容。"#;

pub const URL_FALLBACK_SYSTEM_TEMPLATE: &str = "无法直接读取该网页。请根据链接推断其可能的主题，生成适合{{ akira.name }}（女性）和{{ yuuki.name }}（男性）双人日语播客讨论的背景信息和讨论素材。明确说明内容基于推断，不要编造具体数字或引语。";

pub const URL_FALLBACK_USER_TEMPLATE: &str = "请根据这个链接生成播客讨论素材：{{ url }}";

fn render(template: &str, ctx: minijinja::Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("prompt", template)?;
    let tmpl = env.get_template("prompt")?;
    Ok(tmpl.render(ctx)?)
}

/// Two-host dialogue script request for `content`.
pub fn dialogue(roster: &VoiceRoster, content: &str) -> Result<Completion> {
    let content: String = content.chars().take(DIALOGUE_SOURCE_CHARS).collect();
    Ok(Completion {
        system: render(
            DIALOGUE_SYSTEM_TEMPLATE,
            context! { akira => roster.akira, yuuki => roster.yuuki },
        )?,
        user: render(DIALOGUE_USER_TEMPLATE, context! { content })?,
        max_tokens: 2000,
        temperature: 0.9,
    })
}

/// Single-narrator script request.
pub fn narration(content: &str, style: &str, voice: &str) -> Result<Completion> {
    Ok(Completion {
        system: render(NARRATION_SYSTEM_TEMPLATE, context! { style, voice })?,
        user: render(NARRATION_USER_TEMPLATE, context! { content })?,
        max_tokens: 4000,
        temperature: 0.7,
    })
}

/// Discussion material for a tweet URL.
pub fn tweet_analysis(roster: &VoiceRoster, url: &str) -> Result<Completion> {
    Ok(Completion {
        system: render(
            TWEET_SYSTEM_TEMPLATE,
            context! { akira => roster.akira, yuuki => roster.yuuki },
        )?,
        user: render(
            TWEET_USER_TEMPLATE,
            context! { url, akira => roster.akira, yuuki => roster.yuuki },
        )?,
        max_tokens: 5000,
        temperature: 0.8,
    })
}

/// Discussion material for a URL that could not be scraped.
pub fn url_fallback(roster: &VoiceRoster, url: &str) -> Result<Completion> {
    Ok(Completion {
        system: render(
            URL_FALLBACK_SYSTEM_TEMPLATE,
            context! { akira => roster.akira, yuuki => roster.yuuki },
        )?,
        user: render(URL_FALLBACK_USER_TEMPLATE, context! { url })?,
        max_tokens: 3000,
        temperature: 0.8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_prompt_names_both_hosts() {
        let roster = VoiceRoster::default();
        let c = dialogue(&roster, "ニュース本文").unwrap();
        assert!(c.system.contains("**アキラ:** スピーチ内容"));
        assert!(c.system.contains("**ユウキ:** スピーチ内容"));
        assert!(c.system.contains(&roster.akira.personality));
        assert!(c.user.ends_with("ニュース本文"));
        assert_eq!(c.max_tokens, 2000);
        assert_eq!(c.temperature, 0.9);
    }

    #[test]
    fn dialogue_source_is_truncated() {
        let long = "あ".repeat(DIALOGUE_SOURCE_CHARS + 100);
        let c = dialogue(&VoiceRoster::default(), &long).unwrap();
        let body = c.user.rsplit("\n\n").next().unwrap();
        assert_eq!(body.chars().count(), DIALOGUE_SOURCE_CHARS);
    }

    #[test]
    fn narration_prompt_carries_style() {
        let c = narration("短いニュース", "interview", "male").unwrap();
        assert!(c.system.contains("スタイル: interview"));
        assert!(c.system.contains("音声タイプ: male"));
        assert!(c.user.ends_with("短いニュース"));
        assert_eq!(c.max_tokens, 4000);
    }

    #[test]
    fn tweet_prompt_includes_url() {
        let c = tweet_analysis(&VoiceRoster::default(), "https://x.com/a/status/1").unwrap();
        assert!(c.user.contains("https://x.com/a/status/1"));
        assert!(c.system.contains("アキラ（女性）"));
        assert_eq!(c.max_tokens, 5000);
    }
}
