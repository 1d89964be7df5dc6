//! Ordered record storage shared by the windowing and interaction layers.

use super::identifiers::RecordIndex;
use super::record::Record;

/// How `update_full_dataset` copies the caller's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Clone records, sharing rich content trees with the caller.
    #[default]
    Shallow,
    /// Clone records and duplicate rich content trees, insulating the list
    /// from any later change the caller makes to shared content.
    Deep,
}

/// Ordered sequence of records.
///
/// # Invariants
/// - After every mutation, `records[i].index() == i` for all `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    records: Vec<Record>,
}

/// Assign `0..len` to every record's index, in order.
pub fn reindex(records: &mut [Record]) {
    for (position, record) in records.iter_mut().enumerate() {
        record.set_index(position);
    }
}

impl DataSet {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from owned records, indexing them.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut data = Self { records };
        data.reindex();
        data
    }

    /// Copy `records` in with the given mode, replacing everything.
    pub fn replace_from(&mut self, records: &[Record], mode: CopyMode) {
        self.records = match mode {
            CopyMode::Shallow => records.to_vec(),
            CopyMode::Deep => records.iter().map(Record::deep_clone).collect(),
        };
        self.reindex();
    }

    /// Re-derive every record's index from its position.
    pub fn reindex(&mut self) {
        reindex(&mut self.records);
    }

    /// Replace the record at `index`. Returns `false` when out of range.
    pub fn patch(&mut self, index: usize, record: Record) -> bool {
        let Some(slot) = self.records.get_mut(index) else {
            return false;
        };
        *slot = record;
        slot.set_index(index);
        true
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records, in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Set the `is_selected` mirror of one record.
    pub(crate) fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(record) = self.records.get_mut(index) {
            record.is_selected = selected;
        }
    }

    /// Remove `is_selected` from every record.
    pub(crate) fn clear_selected(&mut self) {
        for record in &mut self.records {
            record.is_selected = false;
        }
    }

    /// Indices of records currently flagged as selected.
    pub fn selected_indices(&self) -> Vec<RecordIndex> {
        self.records
            .iter()
            .filter(|record| record.is_selected)
            .map(Record::index)
            .collect()
    }

    /// Selected records in dataset order.
    pub fn selected(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|record| record.is_selected)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RichNode;

    fn records(texts: &[&str]) -> Vec<Record> {
        texts.iter().map(|t| Record::new(*t)).collect()
    }

    #[test]
    fn from_records_assigns_positions() {
        let data = DataSet::from_records(records(&["a", "b", "c"]));
        let indices: Vec<_> = data.iter().map(|r| r.index().get()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn replace_reindexes_new_records() {
        let mut data = DataSet::from_records(records(&["a"]));
        data.replace_from(&records(&["x", "y"]), CopyMode::Shallow);
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(1).unwrap().index().get(), 1);
    }

    #[test]
    fn patch_keeps_index_of_position() {
        let mut data = DataSet::from_records(records(&["a", "b", "c"]));
        assert!(data.patch(1, Record::new("B")));
        let patched = data.get(1).unwrap();
        assert_eq!(patched.text.plain_text(), "B");
        assert_eq!(patched.index().get(), 1);
    }

    #[test]
    fn patch_out_of_range_is_rejected() {
        let mut data = DataSet::from_records(records(&["a"]));
        assert!(!data.patch(5, Record::new("z")));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn selected_follows_dataset_order() {
        let mut data = DataSet::from_records(records(&["a", "b", "c", "d"]));
        data.set_selected(3, true);
        data.set_selected(1, true);
        let texts: Vec<_> = data.selected().iter().map(|r| r.text.plain_text()).collect();
        assert_eq!(texts, vec!["b", "d"]);
        assert_eq!(
            data.selected_indices(),
            vec![RecordIndex::new(1), RecordIndex::new(3)]
        );
    }

    #[test]
    fn clear_selected_removes_every_flag() {
        let mut data = DataSet::from_records(vec![Record::new("a").selected(), Record::new("b").selected()]);
        data.clear_selected();
        assert!(data.iter().all(|r| !r.is_selected));
    }

    #[test]
    fn deep_copy_does_not_share_rich_content() {
        let source = vec![Record::new(RichNode::new("i").with_text("x"))];
        let mut data = DataSet::new();
        data.replace_from(&source, CopyMode::Deep);
        assert_eq!(data.get(0).unwrap().text, source[0].text);
        match (&data.get(0).unwrap().text, &source[0].text) {
            (crate::model::RecordText::Rich(a), crate::model::RecordText::Rich(b)) => {
                assert!(!std::rc::Rc::ptr_eq(a, b));
            }
            _ => panic!("expected rich content"),
        }
    }
}
