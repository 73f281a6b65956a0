use std::collections::HashMap;

use crate::fields::FieldId;

/// Machine name of a layout region.
pub type RegionName = String;

/// Resolved grouping of fields by target region for one render pass.
///
/// Buckets appear in first-insertion order and hold field ids in input
/// order. The map is rebuilt on demand and holds no long-lived state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    buckets: Vec<(RegionName, Vec<FieldId>)>,
}

impl RegionMap {
    /// Bucket each field into its target region.
    ///
    /// A field's explicit assignment wins only when it names a region of
    /// the active layout; otherwise the field falls back to
    /// `default_region`. The default itself is not checked against
    /// `valid_regions`.
    pub fn resolve<I, S>(
        fields: I,
        assignments: &HashMap<FieldId, RegionName>,
        default_region: &str,
        valid_regions: &[RegionName],
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldId>,
    {
        let mut map = Self::default();
        for field in fields {
            let field = field.into();
            let target = match assignments.get(&field) {
                Some(region) if valid_regions.iter().any(|valid| valid == region) => {
                    region.as_str()
                }
                _ => default_region,
            };
            map.push(target, field);
        }
        map
    }

    fn push(&mut self, region: &str, field: FieldId) {
        match self.buckets.iter_mut().find(|(name, _)| name == region) {
            Some((_, bucket)) => bucket.push(field),
            None => self.buckets.push((region.to_string(), vec![field])),
        }
    }

    /// Fields bucketed under the region, in input order.
    pub fn fields_in(&self, region: &str) -> Option<&[FieldId]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, bucket)| bucket.as_slice())
    }

    /// Region names in first-insertion order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionName> {
        self.buckets.iter().map(|(name, _)| name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionName, &[FieldId])> {
        self.buckets
            .iter()
            .map(|(name, bucket)| (name, bucket.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<RegionName> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn assignments(pairs: &[(&str, &str)]) -> HashMap<FieldId, RegionName> {
        pairs
            .iter()
            .map(|(field, region)| (field.to_string(), region.to_string()))
            .collect()
    }

    #[test]
    fn assigned_fields_land_in_their_regions() {
        let map = RegionMap::resolve(
            ["a", "b", "c"],
            &assignments(&[("a", "sidebar"), ("b", "main")]),
            "main",
            &names(&["main", "sidebar"]),
        );

        assert_eq!(map.fields_in("sidebar").unwrap(), ["a"]);
        assert_eq!(map.fields_in("main").unwrap(), ["b", "c"]);
        let regions: Vec<_> = map.regions().cloned().collect();
        assert_eq!(regions, vec!["sidebar", "main"]);
    }

    #[test]
    fn stale_assignment_falls_back_to_default() {
        let map = RegionMap::resolve(
            ["a", "b"],
            &assignments(&[("a", "removed_region")]),
            "main",
            &names(&["main"]),
        );

        assert_eq!(map.len(), 1);
        assert_eq!(map.fields_in("main").unwrap(), ["a", "b"]);
        assert!(map.fields_in("removed_region").is_none());
    }

    #[test]
    fn unassigned_fields_use_the_default() {
        let map = RegionMap::resolve(
            ["a"],
            &HashMap::new(),
            "main",
            &names(&["main", "sidebar"]),
        );
        assert_eq!(map.fields_in("main").unwrap(), ["a"]);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let fields: [&str; 0] = [];
        let map = RegionMap::resolve(fields, &HashMap::new(), "main", &names(&["main"]));
        assert!(map.is_empty());
    }

    #[test]
    fn every_field_lands_in_exactly_one_bucket() {
        let fields = ["a", "b", "c", "d", "e"];
        let map = RegionMap::resolve(
            fields,
            &assignments(&[("b", "sidebar"), ("d", "footer"), ("e", "ghost")]),
            "main",
            &names(&["main", "sidebar", "footer"]),
        );

        let mut seen = Vec::new();
        for (_, bucket) in map.iter() {
            seen.extend(bucket.iter().cloned());
        }
        seen.sort();
        assert_eq!(seen, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn bucket_order_follows_input_order() {
        let map = RegionMap::resolve(
            ["z", "m", "a"],
            &HashMap::new(),
            "main",
            &names(&["main"]),
        );
        assert_eq!(map.fields_in("main").unwrap(), ["z", "m", "a"]);
    }

    #[test]
    fn default_region_is_not_revalidated() {
        // An administrator can point the default at a region the active
        // layout no longer declares; fields still bucket under it.
        let map = RegionMap::resolve(["a"], &HashMap::new(), "gone", &names(&["main"]));
        assert_eq!(map.fields_in("gone").unwrap(), ["a"]);
    }

    #[test]
    fn resolution_is_repeatable() {
        let fields = ["a", "b"];
        let table = assignments(&[("a", "sidebar")]);
        let valid = names(&["main", "sidebar"]);
        let first = RegionMap::resolve(fields, &table, "main", &valid);
        let second = RegionMap::resolve(fields, &table, "main", &valid);
        assert_eq!(first, second);
    }
}
