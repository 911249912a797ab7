//! Annotation rendering: pure text-to-representation, no tree access.

use pinyin::ScriptProvider;

/// One piece of a rendered text unit, in original order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A literal run of the input, annotated characters included.
    Run(String),
    /// A wrapper whose text content is the phonetic rendering of the
    /// character that precedes it.
    Gloss(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// No rendering differed from its source character; leave the unit alone.
    Unchanged,
    /// At least one gloss was attached.
    Fragment(Vec<Segment>),
}

/// Walk `text` character by character and attach a gloss after every
/// target-script character with a known rendering. All other characters are
/// copied through in place; concatenating the `Run` segments reconstructs
/// the input exactly.
///
/// The gloss travels as segment data and is later inserted as a text node,
/// never re-parsed as markup, so neither page text nor the rendering service
/// can smuggle structure into the tree.
pub fn render<P: ScriptProvider>(text: &str, provider: &P) -> Rendered {
    let mut segments = Vec::new();
    let mut run = String::new();
    let mut changed = false;
    let mut scratch = [0u8; 4];

    for ch in text.chars() {
        run.push(ch);
        if provider.is_target_char(ch)
            && let Some(gloss) = provider.rendering(ch)
            && !gloss.is_empty()
            && gloss != ch.encode_utf8(&mut scratch)
        {
            changed = true;
            segments.push(Segment::Run(std::mem::take(&mut run)));
            segments.push(Segment::Gloss(gloss.to_string()));
        }
    }

    if !changed {
        return Rendered::Unchanged;
    }
    if !run.is_empty() {
        segments.push(Segment::Run(run));
    }
    Rendered::Fragment(segments)
}

/// Reconstruct the original text from a rendered fragment by dropping every
/// gloss. Inverse of `render` for the `Run` content.
pub fn stripped_text(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if let Segment::Run(text) = segment {
            out.push_str(text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinyin::PinyinTable;

    #[test]
    fn renders_the_reference_example() {
        let table = PinyinTable::new();
        let Rendered::Fragment(segments) = render("我爱中国", &table) else {
            panic!("expected a fragment");
        };
        assert_eq!(
            segments,
            vec![
                Segment::Run("我".to_string()),
                Segment::Gloss("wǒ".to_string()),
                Segment::Run("爱".to_string()),
                Segment::Gloss("ài".to_string()),
                Segment::Run("中".to_string()),
                Segment::Gloss("zhōng".to_string()),
                Segment::Run("国".to_string()),
                Segment::Gloss("guó".to_string()),
            ]
        );
    }

    #[test]
    fn ascii_only_input_is_unchanged() {
        let table = PinyinTable::new();
        assert_eq!(render("hello", &table), Rendered::Unchanged);
    }

    #[test]
    fn unknown_ideographs_alone_are_unchanged() {
        let table = PinyinTable::new();
        // Target script, but the table has no rendering for it.
        assert_eq!(render("魑魅魍魉", &table), Rendered::Unchanged);
    }

    #[test]
    fn mixed_text_keeps_surrounding_runs_intact() {
        let table = PinyinTable::new();
        let Rendered::Fragment(segments) = render("say 你好 now", &table) else {
            panic!("expected a fragment");
        };
        assert_eq!(
            segments,
            vec![
                Segment::Run("say 你".to_string()),
                Segment::Gloss("nǐ".to_string()),
                Segment::Run("好".to_string()),
                Segment::Gloss("hǎo".to_string()),
                Segment::Run(" now".to_string()),
            ]
        );
    }

    #[test]
    fn stripping_glosses_reconstructs_the_input() {
        let table = PinyinTable::new();
        for input in [
            "我爱中国",
            "say 你好 now",
            "混合 text 与 target 字",
            "标点，与。符号！",
            "trailing 中",
            "中 leading",
        ] {
            match render(input, &table) {
                Rendered::Unchanged => {}
                Rendered::Fragment(segments) => {
                    assert_eq!(
                        stripped_text(&segments),
                        input,
                        "content must be preserved for {input:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn every_gloss_follows_its_character() {
        let table = PinyinTable::new();
        let Rendered::Fragment(segments) = render("中中", &table) else {
            panic!("expected a fragment");
        };
        // Runs and glosses alternate; a gloss never opens the fragment.
        assert!(matches!(segments.first(), Some(Segment::Run(_))));
        for pair in segments.windows(2) {
            if let Segment::Gloss(_) = &pair[1] {
                assert!(
                    matches!(&pair[0], Segment::Run(r) if !r.is_empty()),
                    "gloss must follow a non-empty run"
                );
            }
        }
    }
}
