use proptest::prelude::*;

/// Non-blank step text that never collides with a reserved wizard command
pub fn step_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.-]{0,40}"
        .prop_map(|text| text.trim().to_string())
        .prop_filter("must not be a reserved command", |text| {
            !["done", "review", "cancel"]
                .iter()
                .any(|reserved| text.eq_ignore_ascii_case(reserved))
        })
}

pub fn steps_strategy(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(step_text_strategy(), 1..=max_len)
}

/// Short labels drawn from a small alphabet so that overlaps are common
pub fn label_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Build", "Test", "Release", "Notify", "Verify", "Rollback"])
        .prop_map(str::to_string)
}

pub fn labels_strategy(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(label_strategy(), 0..=max_len)
}
