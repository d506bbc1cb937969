use crate::record::{Record, RecordKind};

/// The five records written by ledger initialization, tagged with `kind`.
pub fn seed_records(kind: RecordKind) -> Vec<Record> {
    [
        ("1", "Kausthub", "M", 123, 2323, "abc"),
        ("2", "Devika", "F", 223, 4643, "xyz"),
        ("3", "Nithin", "M", 323, 7823, "abc"),
        ("4", "Deeksha", "F", 423, 2532, "abc"),
        ("5", "David", "M", 523, 9832, "xyz"),
    ]
    .into_iter()
    .map(|(id, name, gender, pan, aadar_no, bank)| {
        Record::new(id, name, gender, pan, aadar_no, bank).with_doc_type(kind)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_tagged_records() {
        let seeds = seed_records(RecordKind::Customer);
        let ids: Vec<_> = seeds.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
        assert!(seeds.iter().all(|r| r.doc_type.as_deref() == Some("customer")));
        assert_eq!(seeds[1].name, "Devika");
        assert_eq!(seeds[4].aadar_no, 9832);
    }
}
