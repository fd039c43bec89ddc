/// Section heading glyphs, in the order the sections appear.
///
/// The sanitizer lets lines starting with one of these through untouched, so
/// the prompt and the sanitizer must agree on this set.
pub const HEADING_GLYPHS: [&str; 4] = ["📋", "📌", "✅", "🚀"];

/// Build the fixed Japanese summary prompt for a meeting transcript.
pub fn build_summary_prompt(title: &str, participants: &str, transcript: &str) -> String {
    let [summary, shared, decisions, actions] = HEADING_GLYPHS;
    format!(
        "以下は会議の文字起こしです。日本語で、Slackにそのまま投稿できる形式で簡潔にまとめてください。\n\
\n\
出力は次の4つのセクションだけで構成し、見出しは以下の表記を一字一句そのまま使ってください。\n\
\n\
{summary} *1. 会議サマリー*\n\
会議全体の要点を箇条書きで記載\n\
\n\
{shared} *2. 共有・確認事項*\n\
会議中に共有された情報や、既に決まっていることの確認を箇条書きで記載（なければ「特になし」）\n\
\n\
{decisions} *3. 決定事項*\n\
この会議で新たに決定された事項だけを箇条書きで記載（なければ「特になし」）\n\
\n\
{actions} *4. ネクストアクション*\n\
今後の対応事項を「担当者：内容」の形で箇条書きで記載（なければ「特になし」）\n\
\n\
書式のルール:\n\
- 箇条書きは必ず行頭に「• 」を付ける（「-」や「*」は使わない）\n\
- 強調は *テキスト* のようにアスタリスク1つで囲む（**は使わない）\n\
- セクションの間は空行を1行入れる\n\
- 見出し以外では絵文字や :emoji: 形式のコードを使わない\n\
- Markdownの見出し記号（#）や表は使わない\n\
\n\
内容のルール:\n\
- 文字起こしに含まれる情報だけを使う\n\
- 同じ内容を複数のセクションに重複して書かない\n\
- 既存の事実や過去の決定を再確認しただけのものは「共有・確認事項」に書き、「決定事項」には含めない\n\
- 「決定事項」には、この会議で新しく合意・決定されたことだけを書く\n\
\n\
---\n\
会議タイトル: {title}\n\
参加者: {participants}\n\
\n\
文字起こし:\n\
{transcript}\n"
    )
}
