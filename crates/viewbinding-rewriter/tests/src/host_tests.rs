use std::collections::BTreeSet;

use super::*;

fn reference(
    file: &str,
    start: u32,
    end: u32,
) -> Reference {
    Reference {
        file: FileId::new(file),
        range: TextRange::new(TextSize::from(start), TextSize::from(end)),
    }
}

#[test]
fn references_order_by_file_then_range() {
    let references: BTreeSet<Reference> = [
        reference("b.kt", 0, 5),
        reference("a.kt", 10, 15),
        reference("a.kt", 2, 7),
        reference("a.kt", 2, 4),
        reference("a.kt", 2, 7),
    ]
    .into_iter()
    .collect();

    assert_eq!(references.into_iter().collect::<Vec<_>>(), vec![
        reference("a.kt", 2, 4),
        reference("a.kt", 2, 7),
        reference("a.kt", 10, 15),
        reference("b.kt", 0, 5),
    ]);
}

#[test]
fn module_ids_drop_surrounding_colons() {
    assert_eq!(ModuleId::new(":feature:login:").gradle_path(), "feature:login");
    assert_eq!(ModuleId::new("feature:login").short_name(), "login");
    assert!(ModuleId::new(":").is_root());
}
