// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod field_store_tests {
    use crate::db::FieldDb;
    use crate::error::ErrorKind;
    use crate::field_value::FieldValue;
    use crate::record::FieldRecord;
    use crate::store::FieldStore;
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    fn store() -> FieldStore {
        FieldStore::open_in_memory().unwrap()
    }

    fn fields(pairs: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    const BAD_IDS: &[&str] = &["", "abc", "abcde", "zz34", "ab 4", "1a2b3"];

    // ═══════════════════════════════════════════════════════════════════════
    // Validation
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_validating_operations_reject_bad_ids() {
        let store = store();
        for &bad in BAD_IDS {
            let kinds = [
                store.get_message(bad).unwrap_err().kind(),
                store.get_field(bad, "x").unwrap_err().kind(),
                store.upsert_field(bad, "x", FieldValue::Null).unwrap_err().kind(),
                store
                    .upsert_message(bad, [("x", FieldValue::Null)])
                    .unwrap_err()
                    .kind(),
            ];
            for kind in kinds {
                assert_eq!(kind, Some(ErrorKind::InvalidIdentifier), "{bad:?}");
            }
        }
        assert!(store.list_all_fields().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_reason_echoes_value() {
        let err = store().get_message("xyz").unwrap_err();
        assert!(err.to_string().contains("'xyz'"), "{err}");
        assert!(!err.is_fault());
    }

    #[test]
    fn test_field_name_is_unconstrained() {
        let store = store();
        for name in ["", " ", "with/slash", "ünïcode", "a:b"] {
            store.upsert_field("ab34", name, FieldValue::from(1i64)).unwrap();
            assert_eq!(store.get_field("ab34", name).unwrap().name, name);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Fields
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_upsert_replaces_instead_of_appending() {
        let store = store();
        store.upsert_field("ab34", "x", FieldValue::from(1i64)).unwrap();
        let written = store.upsert_field("ab34", "x", FieldValue::from(2i64)).unwrap();
        assert_eq!(written, FieldRecord::new("ab34", "x", FieldValue::from(2i64)));

        let all = store.list_all_fields().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, FieldValue::from(2i64));
        assert_eq!(store.count_fields().unwrap(), 1);
    }

    #[test]
    fn test_get_field_missing_is_not_found() {
        let store = store();
        let err = store.get_field("ab34", "x").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));

        store.upsert_field("ab34", "y", FieldValue::Null).unwrap();
        let err = store.get_field("ab34", "x").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_nested_value_roundtrip() {
        let store = store();
        let value = FieldValue::Array(vec![1i64.into(), "two".into(), FieldValue::Null]);
        store.upsert_field("ab34", "x", value.clone()).unwrap();

        let record = store.get_field("ab34", "x").unwrap();
        assert_eq!(record.message_id, "ab34");
        assert_eq!(record.value, value);
    }

    #[test]
    fn test_ids_differing_in_case_are_distinct() {
        let store = store();
        store.upsert_field("ab34", "x", FieldValue::from(1i64)).unwrap();
        store.upsert_field("AB34", "x", FieldValue::from(2i64)).unwrap();

        assert_eq!(store.get_field("ab34", "x").unwrap().value, FieldValue::from(1i64));
        assert_eq!(store.get_field("AB34", "x").unwrap().value, FieldValue::from(2i64));
    }

    #[test]
    fn test_ambiguous_field_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let db = FieldDb::open_in_memory()?;
        let doc = serde_json::to_vec(&FieldRecord::new("ab34", "x", FieldValue::from(1i64)))?;
        db.put_raw(("ab34", "x"), &doc)?;
        db.put_raw(("ab34", "x-copy"), &doc)?;
        let store = FieldStore::with_db(db);

        let err = store.get_field("ab34", "x").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::AmbiguousMatch));
        assert_eq!(
            err.to_string(),
            "Multiple results found for 'x' in message 'ab34'. Expected 1."
        );
        Ok(())
    }

    #[test]
    fn test_unsigned_value_reads_back_equal() {
        let store = store();
        let written = store.upsert_field("ab34", "n", FieldValue::from(5u64)).unwrap();
        let read = store.get_field("ab34", "n").unwrap();
        assert_eq!(written, read);

        let big = store.upsert_field("ab34", "big", FieldValue::from(u64::MAX)).unwrap();
        assert_eq!(big, store.get_field("ab34", "big").unwrap());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Messages
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_upsert_message_then_get() {
        let store = store();
        let forward = store
            .upsert_message("0001", [("a", FieldValue::from(1i64)), ("b", FieldValue::from(2i64))])
            .unwrap();
        let reverse = store
            .upsert_message("0002", [("b", FieldValue::from(2i64)), ("a", FieldValue::from(1i64))])
            .unwrap();

        let expected = fields(&[("a", 1i64.into()), ("b", 2i64.into())]);
        assert_eq!(forward.fields, expected);
        assert_eq!(reverse.fields, expected);
        assert_eq!(store.get_message("0001").unwrap().fields, expected);
        assert_eq!(store.get_message("0002").unwrap().fields, expected);
    }

    #[test]
    fn test_upsert_message_merges_with_existing_fields() {
        let store = store();
        store.upsert_field("1a2b", "keep", FieldValue::from(true)).unwrap();
        let message = store
            .upsert_message("1a2b", BTreeMap::from([("temp".to_string(), FieldValue::from(72i64))]))
            .unwrap();
        assert_eq!(
            message.fields,
            fields(&[("keep", true.into()), ("temp", 72i64.into())])
        );
    }

    #[test]
    fn test_get_message_missing_is_not_found() {
        let err = store().get_message("beef").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
        assert!(err.to_string().contains("'beef'"));
    }

    #[test]
    fn test_upsert_message_with_no_fields_is_not_found() {
        let err = store()
            .upsert_message("beef", Vec::<(String, FieldValue)>::new())
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn test_list_all_messages_groups_by_id() {
        let store = store();
        store
            .upsert_message("bbbb", [("x", FieldValue::from(1i64)), ("y", FieldValue::from("y"))])
            .unwrap();
        store.upsert_field("aaaa", "z", FieldValue::Null).unwrap();

        let mut messages = store.list_all_messages().unwrap();
        assert_eq!(messages.len(), 2);
        messages.sort_by(|a, b| a.message_id.cmp(&b.message_id));

        assert_eq!(messages[0].message_id, "aaaa");
        assert_eq!(messages[0].fields, fields(&[("z", FieldValue::Null)]));
        assert_eq!(messages[1].message_id, "bbbb");
        assert_eq!(messages[1].fields, fields(&[("x", 1i64.into()), ("y", "y".into())]));
    }

    #[test]
    fn test_list_on_empty_store() {
        let store = store();
        assert!(store.list_all_fields().unwrap().is_empty());
        assert!(store.list_all_messages().unwrap().is_empty());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Deletes
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_delete_message() {
        let store = store();
        store
            .upsert_message("ab34", [("a", FieldValue::Null), ("b", FieldValue::Null)])
            .unwrap();
        store.upsert_field("cd56", "a", FieldValue::Null).unwrap();

        store.delete_message("ab34").unwrap();
        assert_eq!(
            store.get_message("ab34").unwrap_err().kind(),
            Some(ErrorKind::NotFound)
        );
        assert!(store.get_message("cd56").is_ok());

        // Idempotent, and permissive about malformed ids.
        store.delete_message("ab34").unwrap();
        for &bad in BAD_IDS {
            store.delete_message(bad).unwrap();
        }
        assert_eq!(store.count_fields().unwrap(), 1);
    }

    #[test]
    fn test_delete_field() {
        let store = store();
        store.upsert_field("ab34", "x", FieldValue::Null).unwrap();
        store.delete_field("ab34", "x").unwrap();
        store.delete_field("ab34", "x").unwrap();
        store.delete_field("not-an-id", "x").unwrap();
        assert_eq!(
            store.get_field("ab34", "x").unwrap_err().kind(),
            Some(ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_clear_all() {
        let store = store();
        store.upsert_field("0001", "a", FieldValue::Null).unwrap();
        store.upsert_field("0002", "b", FieldValue::Null).unwrap();
        store.clear_all().unwrap();
        assert!(store.list_all_fields().unwrap().is_empty());
        store.clear_all().unwrap();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // End to end
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_temperature_scenario_on_disk() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_file = NamedTempFile::new()?;
        let store = FieldStore::open(tmp_file.path())?;

        let message = store.upsert_message(
            "1a2b",
            [("temp", FieldValue::from(72i64)), ("unit", FieldValue::from("F"))],
        )?;
        assert_eq!(message.message_id, "1a2b");
        assert_eq!(message.fields, fields(&[("temp", 72i64.into()), ("unit", "F".into())]));

        let message = store.get_message("1a2b")?;
        assert_eq!(message.fields, fields(&[("temp", 72i64.into()), ("unit", "F".into())]));

        store.delete_field("1a2b", "unit")?;
        drop(store);

        let store = FieldStore::open(tmp_file.path())?;
        let message = store.get_message("1a2b")?;
        assert_eq!(message.message_id, "1a2b");
        assert_eq!(message.fields, fields(&[("temp", 72i64.into())]));
        Ok(())
    }
}
