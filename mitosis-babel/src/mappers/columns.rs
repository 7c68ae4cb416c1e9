//! Columns ⇄ `Column` children.
//!
//! A `Columns` element keeps its columns in `options.columns`, each one a
//! `{ blocks, ...fields }` object. In the IR every column is a `Column` child
//! whose literal properties are the column fields and whose children are the
//! column blocks. Absent fields stay absent in both directions.

use serde_json::{Map, Value};

use crate::ir::nodes::MitosisNode;

use super::literal_fields;
use super::slots::BlockGroup;

pub const COLUMNS: &str = "Columns";
pub const COLUMN: &str = "Column";
/// Option holding the column list.
pub const COLUMNS_OPTION: &str = "columns";

pub fn column_node(group: &BlockGroup, children: Vec<MitosisNode>) -> MitosisNode {
    let mut node = MitosisNode::new(COLUMN).with_children(children);
    for (key, value) in &group.fields {
        node.set_property(key.clone(), value.clone());
    }
    node
}

/// Column entry for a `Column` node whose children were already exported.
pub fn column_entry(node: &MitosisNode, blocks: Vec<Value>) -> Value {
    let mut entry = Map::new();
    entry.insert("blocks".to_string(), Value::Array(blocks));
    entry.extend(literal_fields(node));
    Value::Object(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::Binding;
    use indexmap::IndexMap;
    use serde_json::json;

    #[test]
    fn absent_width_never_appears() {
        let group = BlockGroup {
            fields: IndexMap::new(),
            blocks: vec![],
        };
        let node = column_node(&group, vec![]);
        assert!(node.properties.is_empty());
        assert_eq!(column_entry(&node, vec![]), json!({"blocks": []}));
    }

    #[test]
    fn literal_width_stays_literal() {
        let mut fields = IndexMap::new();
        fields.insert("width".to_string(), json!(50));
        let group = BlockGroup {
            fields,
            blocks: vec![],
        };
        let node = column_node(&group, vec![MitosisNode::new("p")]);

        assert_eq!(node.properties["width"], json!(50));
        assert!(node.bindings.is_empty());
        assert_eq!(column_entry(&node, vec![]), json!({"blocks": [], "width": 50}));
    }

    #[test]
    fn literal_bindings_fold_back_and_dynamic_ones_drop() {
        let mut node = MitosisNode::new(COLUMN);
        node.set_binding("width", Binding::expression("50"));
        node.set_binding("link", Binding::expression("state.url"));

        assert_eq!(column_entry(&node, vec![]), json!({"blocks": [], "width": 50}));
    }
}
