use super::model::ParsedRecord;

/// Static rename table moving source-specific field names onto the
/// canonical output schema. Applied in order; renames only, no values are
/// synthesized, and absent keys are a no-op.
const TRANSFORMS: [(&str, &str); 4] = [
    ("SourceNetworkAddress", "ip_src_addr"),
    ("SourcePort", "ip_src_port"),
    ("NetworkAddress", "ip_src_addr"),
    ("Port", "ip_src_port"),
];

pub fn transform_keys(record: &mut ParsedRecord) {
    for (old, new) in TRANSFORMS {
        if let Some(value) = record.remove(old) {
            record.insert(new, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renames_source_network_address() {
        let mut record = ParsedRecord::new();
        record.insert("SourceNetworkAddress", "10.1.2.3");
        transform_keys(&mut record);
        assert_eq!(record.get_str("ip_src_addr"), Some("10.1.2.3"));
        assert!(!record.contains_key("SourceNetworkAddress"));
    }

    #[test]
    fn test_renames_ports() {
        let mut record = ParsedRecord::new();
        record.insert("SourcePort", "49152");
        record.insert("Port", "3389");
        transform_keys(&mut record);
        // Both table entries target ip_src_port; the later entry wins.
        assert_eq!(record.get_str("ip_src_port"), Some("3389"));
        assert!(!record.contains_key("SourcePort"));
        assert!(!record.contains_key("Port"));
    }

    #[test]
    fn test_absent_keys_are_untouched() {
        let mut record = ParsedRecord::new();
        record.insert("syslogHost", "dc01");
        transform_keys(&mut record);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get_str("syslogHost"), Some("dc01"));
    }
}
