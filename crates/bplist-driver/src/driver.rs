use bplist_types::ObjectTable;

use crate::config::{DriverConfig, OutputMode};
use crate::error::DriverError;
use crate::render_json::JsonRenderer;
use crate::render_xml::XmlRenderer;
use crate::tree::Node;

/// Core driver interface: renders a decoded object table as text.
///
/// ```text
/// ObjectTable ──▶ PlistDriver::render() ──▶ XML plist / JSON String
///                        │
///                  DriverConfig
///                  (mode, root, max_depth, max_nodes)
/// ```
///
/// Implementations are stateless; everything comes through
/// [`DriverConfig`] and the table's own resolve configuration.
pub trait PlistDriver {
    /// Render the element at `config.root` and everything it reaches.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::RootOutOfRange`] for a root outside the
    /// table, and the walk errors described on [`Node::build`].
    fn render(&self, table: &ObjectTable, config: &DriverConfig) -> Result<String, DriverError>;
}

/// Default driver: expands the root into a [`Node`] tree, then hands it
/// to the renderer selected by `config.mode`.
///
/// ```text
/// ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
/// │ ObjectTable │────▶│ Node::build  │────▶│ XmlRenderer  │
/// │             │     │ (guarded)    │     │ JsonRenderer │
/// └─────────────┘     └──────────────┘     └──────────────┘
/// ```
pub struct DefaultDriver;

impl PlistDriver for DefaultDriver {
    fn render(&self, table: &ObjectTable, config: &DriverConfig) -> Result<String, DriverError> {
        tracing::debug!(mode = ?config.mode, root = config.root, "rendering plist");
        let root = Node::build(table, config)?;
        match config.mode {
            OutputMode::Xml => Ok(XmlRenderer::render(&root)),
            OutputMode::Json => JsonRenderer::render(&root),
        }
    }
}

#[cfg(test)]
mod tests {
    use bplist_decoder::{BplistDecoder, DecodedPlist, DecoderConfig};
    use bplist_types::ResolveError;

    use super::*;

    fn decode(objects: &[u8], num_objects: u64, config: &DecoderConfig) -> DecodedPlist {
        let mut payload = b"bplist00".to_vec();
        payload.extend_from_slice(objects);
        let offset_table_offset = payload.len() as u64;
        payload.extend(std::iter::repeat_n(0u8, usize::try_from(num_objects).unwrap()));
        let mut trailer = [0u8; 32];
        trailer[6] = 1;
        trailer[7] = 1;
        trailer[8..16].copy_from_slice(&num_objects.to_be_bytes());
        trailer[24..32].copy_from_slice(&offset_table_offset.to_be_bytes());
        payload.extend_from_slice(&trailer);
        BplistDecoder::decode_with(&payload, config).unwrap()
    }

    /// `{"name": "bplist", "tags": [true, 7], "id": UID 3}`
    fn sample() -> DecodedPlist {
        let objects = [
            0xD3, 1, 2, 3, 4, 5, 6, // dict: keys 1..=3, values 4..=6
            0x54, b'n', b'a', b'm', b'e', //
            0x54, b't', b'a', b'g', b's', //
            0x52, b'i', b'd', //
            0x56, b'b', b'p', b'l', b'i', b's', b't', //
            0xA2, 7, 8, //
            0x80, 3, //
            0x09, //
            0x10, 7,
        ];
        decode(&objects, 9, &DecoderConfig::default())
    }

    #[test]
    fn renders_xml_document() {
        let decoded = sample();
        let xml = DefaultDriver.render(&decoded.table, &DriverConfig::default()).unwrap();
        insta::assert_snapshot!(xml, @r#"
<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>name</key>
	<string>bplist</string>
	<key>tags</key>
	<array>
		<true/>
		<integer>7</integer>
	</array>
	<key>id</key>
	<dict>
		<key>CF$UID</key>
		<integer>3</integer>
	</dict>
</dict>
</plist>
"#);
    }

    #[test]
    fn renders_json_document() {
        let decoded = sample();
        let config = DriverConfig {
            mode: OutputMode::Json,
            ..DriverConfig::default()
        };
        let json = DefaultDriver.render(&decoded.table, &config).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "name": "bplist",
                "tags": [true, 7],
                "id": { "CF$UID": 3 },
            })
        );
        assert!(json.find("\"name\"").unwrap() < json.find("\"tags\"").unwrap());
    }

    #[test]
    fn custom_root() {
        let decoded = sample();
        let config = DriverConfig {
            mode: OutputMode::Json,
            root: 5,
            ..DriverConfig::default()
        };
        let json = DefaultDriver.render(&decoded.table, &config).unwrap();
        assert_eq!(json, "[\n  true,\n  7\n]\n");
    }

    #[test]
    fn root_out_of_range() {
        let decoded = sample();
        let config = DriverConfig {
            root: 9,
            ..DriverConfig::default()
        };
        let err = DefaultDriver.render(&decoded.table, &config).unwrap_err();
        assert!(matches!(err, DriverError::RootOutOfRange { root: 9, len: 9 }));
    }

    #[test]
    fn self_reference_hits_depth_limit() {
        let decoded = decode(&[0xA1, 0], 1, &DecoderConfig::default());
        let config = DriverConfig {
            max_depth: 16,
            ..DriverConfig::default()
        };
        let err = DefaultDriver.render(&decoded.table, &config).unwrap_err();
        assert!(matches!(err, DriverError::DepthLimitExceeded { limit: 16, index: 0 }));
    }

    #[test]
    fn self_reference_is_cyclic_when_strict() {
        let decoded = decode(&[0xA1, 0], 1, &DecoderConfig::strict());
        let err = DefaultDriver.render(&decoded.table, &DriverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Resolve(ResolveError::CyclicReference { index: 0 })
        ));
    }

    #[test]
    fn dangling_reference() {
        let decoded = decode(&[0xA1, 5], 1, &DecoderConfig::default());
        let err = DefaultDriver.render(&decoded.table, &DriverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Resolve(ResolveError::IndexOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn shared_reference_renders_twice() {
        let decoded = decode(&[0xA2, 1, 1, 0x51, b'x'], 2, &DecoderConfig::strict());
        let config = DriverConfig {
            mode: OutputMode::Json,
            ..DriverConfig::default()
        };
        let json = DefaultDriver.render(&decoded.table, &config).unwrap();
        assert_eq!(json, "[\n  \"x\",\n  \"x\"\n]\n");
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        // {"k": 1, "k": 2}
        let objects = [0xD2, 1, 1, 2, 3, 0x51, b'k', 0x10, 1, 0x10, 2];
        let decoded = decode(&objects, 4, &DecoderConfig::default());
        let config = DriverConfig {
            mode: OutputMode::Json,
            ..DriverConfig::default()
        };
        let json = DefaultDriver.render(&decoded.table, &config).unwrap();
        assert_eq!(json, "{\n  \"k\": 2\n}\n");
    }

    #[test]
    fn node_budget_caps_shared_expansion() {
        // [a, a] where a = [null, null]: seven nodes once expanded.
        let objects = [0xA2, 1, 1, 0xA2, 2, 2, 0x00];
        let decoded = decode(&objects, 3, &DecoderConfig::default());
        let exact = DriverConfig {
            mode: OutputMode::Json,
            max_nodes: 7,
            ..DriverConfig::default()
        };
        assert!(DefaultDriver.render(&decoded.table, &exact).is_ok());

        let short = DriverConfig { max_nodes: 6, ..exact };
        let err = DefaultDriver.render(&decoded.table, &short).unwrap_err();
        assert!(matches!(err, DriverError::NodeLimitExceeded { limit: 6, index: 2 }), "{err:?}");
    }

    #[test]
    fn container_keys_count_against_node_budget() {
        // {[true]: true}: dict, key array, its item, value.
        let objects = [0xD1, 1, 2, 0xA1, 2, 0x09];
        let decoded = decode(&objects, 3, &DecoderConfig::default());
        let config = DriverConfig {
            max_nodes: 3,
            ..DriverConfig::default()
        };
        let err = DefaultDriver.render(&decoded.table, &config).unwrap_err();
        assert!(matches!(err, DriverError::NodeLimitExceeded { limit: 3, .. }), "{err:?}");
        let config = DriverConfig { max_nodes: 4, ..config };
        assert!(DefaultDriver.render(&decoded.table, &config).is_ok());
    }
}
