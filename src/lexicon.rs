// Copyright 2026 Beckon Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-language word tables: action verbs stripped from utterances and the
//! vocabulary that names each file type. Adding a language is a data change.

use crate::model::FileType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    /// Unrecognized tags fall back to English; never an error.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "zh" => Language::Zh,
            _ => Language::En,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

#[derive(Debug)]
pub struct Lexicon {
    action_words: &'static [&'static str],
    image_words: &'static [&'static str],
    pdf_words: &'static [&'static str],
    presentation_words: &'static [&'static str],
}

// Vocabulary is matched against a lowercased target description, so the
// tables store lowercase forms.
const EN: Lexicon = Lexicon {
    action_words: &["open", "show", "display", "view", "play", "close"],
    image_words: &["photo", "image", "picture"],
    pdf_words: &["document", "pdf", "file"],
    presentation_words: &["presentation", "slides", "ppt"],
};

const ZH: Lexicon = Lexicon {
    action_words: &["打开", "显示", "展示", "查看", "播放", "关闭"],
    image_words: &["照片", "图片", "图像"],
    pdf_words: &["文档", "资料", "pdf"],
    presentation_words: &["演示", "幻灯片", "ppt"],
};

impl Lexicon {
    pub fn for_language(language: Language) -> &'static Lexicon {
        match language {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }

    pub fn action_words(&self) -> &'static [&'static str] {
        self.action_words
    }

    pub fn type_words(&self, kind: FileType) -> &'static [&'static str] {
        match kind {
            FileType::Image => self.image_words,
            FileType::Pdf => self.pdf_words,
            FileType::Presentation => self.presentation_words,
            FileType::Other => &[],
        }
    }
}
