use super::*;

#[test]
fn full_line_range_covers_whole_line_with_newline() {
    let source = "a\n    val x = 1\nb";
    let range = TextRange::new(TextSize::from(6), TextSize::from(15));
    let widened = full_line_range(source, range);
    assert_eq!(range_text(source, widened), "    val x = 1\n");
}

#[test]
fn full_line_range_keeps_range_when_line_is_shared() {
    let source = "a; val x = 1\n";
    let range = TextRange::new(TextSize::from(3), TextSize::from(12));
    assert_eq!(full_line_range(source, range), range);
}

#[test]
fn indentation_is_read_from_line_start() {
    let source = "class A {\n\t  fun f() = 1\n}";
    assert_eq!(indentation_at(source, TextSize::from(14)), "\t  ");
}

#[test]
fn splice_applies_edits_back_to_front() {
    let source = "one two three";
    let mut edits = vec![
        (TextRange::new(TextSize::from(0), TextSize::from(3)), "1".to_string()),
        (TextRange::new(TextSize::from(8), TextSize::from(13)), "3".to_string()),
    ];
    assert_eq!(splice(source, &mut edits), "1 two 3");
}
