use std::time::Duration;

/// Engine tunables. These are constants in spirit: fixed at engine
/// construction, never flipped at runtime.
#[derive(Clone, Debug)]
pub struct AnnotateConfig {
    /// Minimum number of target-script characters a text unit must contain
    /// before it is considered for annotation.
    pub min_target_chars: usize,
    /// Upper bound on text units visited in one scan pass.
    pub max_nodes_per_scan: usize,
    /// Delay between document load and the first scan.
    pub processing_delay: Duration,
    /// Quiet period after the last relevant mutation before a re-scan runs.
    pub debounce_window: Duration,
    /// Class carried by every annotation wrapper element.
    pub annotation_class: String,
    /// Element id guarding the injected stylesheet.
    pub style_element_id: String,
    /// Lowercased tag names whose subtrees are never annotated.
    pub excluded_tags: Vec<String>,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            min_target_chars: 1,
            max_nodes_per_scan: 1000,
            processing_delay: Duration::from_millis(1000),
            debounce_window: Duration::from_millis(500),
            annotation_class: "pinyin-annotation".to_string(),
            style_element_id: "pinyin-annotator-styles".to_string(),
            excluded_tags: vec![
                "script".to_string(),
                "style".to_string(),
                "code".to_string(),
                "pre".to_string(),
                "textarea".to_string(),
                "input".to_string(),
            ],
        }
    }
}
