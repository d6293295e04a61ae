//! Prompt construction for each pipeline stage.

/// Position of a chapter within the article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterRole {
    Introduction,
    Body,
    Conclusion,
}

impl ChapterRole {
    /// Role of chapter `index` in an outline of `total` chapters.
    ///
    /// The first chapter is the introduction even when it is also the last.
    pub fn for_position(index: usize, total: usize) -> Self {
        if index == 0 {
            ChapterRole::Introduction
        } else if index + 1 == total {
            ChapterRole::Conclusion
        } else {
            ChapterRole::Body
        }
    }

    /// Approximate length requested from the model.
    pub fn target_words(self) -> u32 {
        match self {
            ChapterRole::Introduction => 600,
            ChapterRole::Body => 1500,
            ChapterRole::Conclusion => 800,
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            ChapterRole::Introduction => {
                "As the introduction, briefly present the background and the subject."
            }
            ChapterRole::Body => "Develop the subject of this chapter in depth.",
            ChapterRole::Conclusion => {
                "As the conclusion, summarize the key points and look ahead."
            }
        }
    }
}

pub fn title_prompt(topic: &str) -> String {
    format!(
        "Condense the following topic into a concise title of 8-10 characters. \
         Return only the title text and nothing else.\n\n\
         Topic: {topic}"
    )
}

pub fn outline_prompt(topic: &str) -> String {
    format!(
        "Create an article outline for the following topic. Requirements:\n\
         1. Include 5-8 chapters\n\
         2. The first chapter may be an introduction or overview\n\
         3. The middle chapters develop the specific content\n\
         4. The last chapter is a summary or outlook\n\
         5. Return only the chapter titles, without numbering\n\
         6. One chapter title per line\n\n\
         Topic: {topic}\n\n\
         Return the list of chapter titles directly, one per line, with no other explanation."
    )
}

pub fn chapter_prompt(topic: &str, chapter_title: &str, index: usize, total: usize) -> String {
    let role = ChapterRole::for_position(index, total);
    format!(
        "Write the content of an article chapter from the following information:\n\n\
         Topic: {topic}\n\
         Chapter title: {chapter_title}\n\
         Chapter position: chapter {number} of {total}\n\
         Target length: about {words} words\n\n\
         Writing requirements:\n\
         1. Substantial content with clear logic\n\
         2. Use Markdown formatting\n\
         3. Sub-headings may be used (with ###)\n\
         4. {instruction}\n\
         5. Do not repeat the chapter title\n\n\
         Return the chapter content directly, with no other explanation.",
        number = index + 1,
        words = role.target_words(),
        instruction = role.instruction(),
    )
}

/// Trim the model's title and remove quote and bracket punctuation.
pub fn clean_title(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’' | '「' | '」' | '《' | '》'))
        .collect()
}
