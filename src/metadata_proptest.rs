//! Property-based tests for the reconcile pipeline.
//!
//! These tests use proptest to generate random build targets, device records,
//! dependency maps, and filters, and check that the merge invariants hold for
//! all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::DeviceFilter;
    use crate::manifest::BuildTarget;
    use crate::metadata::MetadataBuilder;
    use crate::output::to_json_string;
    use crate::sources::{DeviceDeps, DeviceRecord};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    // A small alphabet so that generated devices collide across inputs.
    fn device_id() -> impl Strategy<Value = String> {
        "[a-e]{1,2}"
    }

    fn build_target() -> impl Strategy<Value = BuildTarget> {
        (device_id(), "(user|userdebug|eng)", "lineage-[0-9]{2}", "[WMN]").prop_map(
            |(device, variant, branch, update_period)| BuildTarget {
                device,
                variant,
                branch,
                update_period,
            },
        )
    }

    fn device_record() -> impl Strategy<Value = DeviceRecord> {
        (
            device_id(),
            "[A-Za-z]{1,8}",
            proptest::option::of("[A-Za-z0-9 ]{1,12}"),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(model, oem, name, lineage_recovery)| DeviceRecord {
                model,
                oem,
                name,
                lineage_recovery,
            })
    }

    fn device_deps() -> impl Strategy<Value = DeviceDeps> {
        proptest::collection::btree_map(
            device_id(),
            proptest::collection::vec(device_id(), 0..4),
            0..8,
        )
    }

    fn device_filter() -> impl Strategy<Value = DeviceFilter> {
        (
            proptest::collection::btree_set(device_id(), 0..12),
            proptest::collection::btree_set(device_id(), 0..4),
        )
            .prop_map(|(supported, unsupported)| DeviceFilter {
                supported,
                unsupported,
            })
    }

    fn reconcile(
        targets: &[BuildTarget],
        records: &[DeviceRecord],
        deps: &DeviceDeps,
        filter: &DeviceFilter,
    ) -> crate::metadata::DeviceMetadataMap {
        let mut builder = MetadataBuilder::new(filter);
        builder.seed_all(targets);
        let mut metadata = builder.build();
        metadata.enrich(records);
        metadata.overlay_deps(deps, filter);
        metadata.into_map()
    }

    proptest! {
        /// Property: every output device came from a build target and passes the filter
        #[test]
        fn output_devices_are_seeded_and_eligible(
            targets in proptest::collection::vec(build_target(), 0..16),
            records in proptest::collection::vec(device_record(), 0..16),
            deps in device_deps(),
            filter in device_filter(),
        ) {
            let map = reconcile(&targets, &records, &deps, &filter);
            for device in map.keys() {
                prop_assert!(targets.iter().any(|t| &t.device == device));
                prop_assert!(filter.supported.contains(device));
                prop_assert!(!filter.unsupported.contains(device));
            }
        }

        /// Property: variant and branch come from the last build target line for the device
        #[test]
        fn variant_and_branch_come_from_last_target(
            targets in proptest::collection::vec(build_target(), 0..16),
            records in proptest::collection::vec(device_record(), 0..16),
            deps in device_deps(),
            filter in device_filter(),
        ) {
            let map = reconcile(&targets, &records, &deps, &filter);

            let mut expected: BTreeMap<&str, &BuildTarget> = BTreeMap::new();
            for target in targets.iter().filter(|t| filter.is_eligible(&t.device)) {
                expected.insert(&target.device, target);
            }

            prop_assert_eq!(map.len(), expected.len());
            for (device, target) in expected {
                let entry = &map[device];
                prop_assert_eq!(&entry.variant, &target.variant);
                prop_assert_eq!(&entry.branch, &target.branch);
            }
        }

        /// Property: deps equal the overlay list exactly, or stay empty without one
        #[test]
        fn deps_are_replaced_wholesale(
            targets in proptest::collection::vec(build_target(), 0..16),
            deps in device_deps(),
            filter in device_filter(),
        ) {
            let map = reconcile(&targets, &[], &deps, &filter);
            for (device, entry) in &map {
                match deps.get(device) {
                    Some(list) => {
                        prop_assert_eq!(&entry.deps, list);
                    }
                    None => {
                        prop_assert!(entry.deps.is_empty());
                    }
                }
            }
        }

        /// Property: enrichment sets vendor exactly when a record exists
        #[test]
        fn vendor_is_lowercase_last_record(
            targets in proptest::collection::vec(build_target(), 0..16),
            records in proptest::collection::vec(device_record(), 0..16),
            filter in device_filter(),
        ) {
            let map = reconcile(&targets, &records, &DeviceDeps::new(), &filter);
            for (device, entry) in &map {
                match records.iter().rev().find(|r| &r.model == device) {
                    Some(record) => {
                        prop_assert_eq!(entry.vendor.clone(), Some(record.oem.to_lowercase()));
                        prop_assert_eq!(&entry.name, &record.name);
                        prop_assert_eq!(
                            entry.lineage_recovery,
                            Some(record.lineage_recovery.unwrap_or(false))
                        );
                    }
                    None => {
                        prop_assert!(entry.vendor.is_none());
                        prop_assert!(entry.name.is_none());
                        prop_assert!(entry.lineage_recovery.is_none());
                    }
                }
            }
        }

        /// Property: reconciling the same inputs twice serializes identically
        #[test]
        fn reconcile_is_deterministic(
            targets in proptest::collection::vec(build_target(), 0..16),
            records in proptest::collection::vec(device_record(), 0..16),
            deps in device_deps(),
            filter in device_filter(),
        ) {
            let first = to_json_string(&reconcile(&targets, &records, &deps, &filter)).unwrap();
            let second = to_json_string(&reconcile(&targets, &records, &deps, &filter)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
