//! Server-rendered HTML for the three browser-facing pages.

use dictionary::Word;

use crate::storage::{VocabularyItem, WordEntry};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
nav a { margin-right: 1rem; }
.card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin: 1rem 0; }
.phonetic { color: #666; margin-left: .5rem; }
.pos { font-style: italic; color: #555; }
.example { color: #555; }
.muted { color: #888; font-size: .9em; }
textarea { width: 100%; min-height: 5rem; }
"#;

const HOME_SCRIPT: &str = r#"
document.getElementById('translate-form').addEventListener('submit', async (event) => {
    event.preventDefault();
    const output = document.getElementById('translation');
    const response = await fetch('/translate', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ text: document.getElementById('source-text').value }),
    });
    const body = await response.json();
    output.textContent = response.ok ? body.translated : body.error;
});
"#;

const SEARCH_SCRIPT: &str = r#"
document.querySelectorAll('form.add-vocabulary').forEach((form) => {
    form.addEventListener('submit', async (event) => {
        event.preventDefault();
        const response = await fetch('/vocabulary/add/' + form.dataset.wordId, {
            method: 'POST',
            body: new URLSearchParams(new FormData(form)),
        });
        const body = await response.json();
        alert(body.message);
    });
});
"#;

const VOCABULARY_SCRIPT: &str = r#"
document.querySelectorAll('button.edit-note').forEach((button) => {
    button.addEventListener('click', async () => {
        const note = prompt('노트', button.dataset.note);
        if (note === null) return;
        const response = await fetch('/vocabulary/edit/' + button.dataset.vocabId, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ note }),
        });
        const body = await response.json();
        alert(body.message);
        if (response.ok) location.reload();
    });
});
document.querySelectorAll('button.remove').forEach((button) => {
    button.addEventListener('click', async () => {
        const response = await fetch('/vocabulary/remove/' + button.dataset.vocabId, { method: 'POST' });
        const body = await response.json();
        alert(body.message);
        if (response.ok) location.reload();
    });
});
"#;

pub fn home() -> String {
    layout(
        "단어 검색",
        &format!(
            r#"<h1>단어 검색</h1>
{search}
<h2>번역</h2>
<form id="translate-form">
<textarea id="source-text" placeholder="English text"></textarea>
<button type="submit">번역</button>
</form>
<p id="translation"></p>"#,
            search = search_form(""),
        ),
        HOME_SCRIPT,
    )
}

pub fn search_results(query: &str, words: &[WordEntry]) -> String {
    let mut body = format!(
        "<h1>검색 결과</h1>\n{}\n",
        search_form(query)
    );
    if words.is_empty() {
        body.push_str(&format!(
            "<p>&quot;{}&quot;에 대한 결과가 없습니다.</p>\n",
            escape(query)
        ));
    }
    for word in words {
        body.push_str(&word_card(word));
    }
    layout("검색 결과", &body, SEARCH_SCRIPT)
}

pub fn vocabulary(items: &[VocabularyItem]) -> String {
    let mut body = String::from("<h1>단어장</h1>\n");
    if items.is_empty() {
        body.push_str("<p>단어장이 비어 있습니다.</p>\n");
    }
    for item in items {
        let heading = match &item.word {
            Some(word) => word_heading(word),
            None => format!(
                "<h2 class=\"muted\">삭제된 단어 #{}</h2>\n",
                item.entry.word_id
            ),
        };
        body.push_str(&format!(
            r#"<div class="card">
{heading}<p>{note}</p>
<p class="muted">{added}</p>
<button class="edit-note" data-vocab-id="{id}" data-note="{note}">노트 수정</button>
<button class="remove" data-vocab-id="{id}">삭제</button>
</div>
"#,
            note = escape(&item.entry.note),
            added = item.entry.added_date.format("%Y-%m-%d %H:%M"),
            id = item.entry.id,
        ));
    }
    layout("단어장", &body, VOCABULARY_SCRIPT)
}

fn layout(title: &str, body: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">홈</a><a href="/vocabulary">단어장</a></nav>
{body}
<script>{script}</script>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn search_form(query: &str) -> String {
    format!(
        r#"<form action="/search" method="get">
<input type="search" name="q" value="{}" placeholder="영어 단어" autofocus>
<button type="submit">검색</button>
</form>"#,
        escape(query)
    )
}

fn word_heading(word: &WordEntry) -> String {
    let mut heading = format!("<h2>{}", escape(&word.word));
    if let Some(phonetic) = &word.phonetic {
        heading.push_str(&format!("<span class=\"phonetic\">{}</span>", escape(phonetic)));
    }
    heading.push_str("</h2>\n");
    if let Some(audio_url) = &word.audio_url {
        heading.push_str(&format!(
            "<audio controls preload=\"none\" src=\"{}\"></audio>\n",
            escape(audio_url)
        ));
    }
    heading
}

fn word_card(word: &WordEntry) -> String {
    let mut card = format!("<div class=\"card\">\n{}", word_heading(word));
    if let Some(details) = word.raw_data.as_deref().and_then(parse_raw) {
        card.push_str(&meanings(&details));
    }
    card.push_str(&format!(
        r#"<form class="add-vocabulary" data-word-id="{}">
<input type="text" name="note" placeholder="노트">
<button type="submit">단어장에 추가</button>
</form>
</div>
"#,
        word.id
    ));
    card
}

fn parse_raw(raw: &str) -> Option<Word> {
    match serde_json::from_str(raw) {
        Ok(word) => Some(word),
        Err(error) => {
            tracing::warn!(%error, "stored dictionary payload is unreadable");
            None
        }
    }
}

fn meanings(word: &Word) -> String {
    let mut html = String::new();
    if let Some(origin) = &word.origin {
        html.push_str(&format!("<p class=\"muted\">{}</p>\n", escape(origin)));
    }
    for meaning in &word.meanings {
        let part_of_speech = meaning.part_of_speech.to_string();
        if !part_of_speech.is_empty() {
            html.push_str(&format!(
                "<p class=\"pos\">{}</p>\n",
                escape(&part_of_speech)
            ));
        }
        html.push_str("<ol>\n");
        for definition in &meaning.definitions {
            html.push_str(&format!("<li>{}", escape(&definition.definition)));
            if let Some(example) = &definition.example {
                html.push_str(&format!(
                    "<br><span class=\"example\">&quot;{}&quot;</span>",
                    escape(example)
                ));
            }
            html.push_str(&word_list("synonyms", &definition.synonyms));
            html.push_str(&word_list("antonyms", &definition.antonyms));
            html.push_str("</li>\n");
        }
        html.push_str("</ol>\n");
        html.push_str(&word_list("synonyms", &meaning.synonyms));
        html.push_str(&word_list("antonyms", &meaning.antonyms));
    }
    html
}

fn word_list(label: &str, words: &[String]) -> String {
    if words.is_empty() {
        return String::new();
    }
    format!(
        "<br><span class=\"muted\">{label}: {}</span>",
        escape(&words.join(", "))
    )
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
