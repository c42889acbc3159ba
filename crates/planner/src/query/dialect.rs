//! Defines the `Dialect` trait for store-specific graph query syntax.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (a property name) in the dialect's quotes.
    ///
    /// - Cypher uses backticks: `` `my_prop` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a named parameter.
    ///
    /// - Cypher uses `$name`
    fn placeholder(&self, key: &str) -> String;

    /// Pattern binding every node to `variable`.
    fn node_pattern(&self, variable: &str) -> String;

    /// Pattern binding every directed edge to `variable`.
    fn edge_pattern(&self, variable: &str) -> String;

    /// Predicate: the node bound to `variable` carries the label held by `placeholder`.
    fn has_label(&self, variable: &str, placeholder: &str) -> String;

    /// Predicate: the edge bound to `variable` has exactly the type held by `placeholder`.
    fn has_type(&self, variable: &str, placeholder: &str) -> String;

    /// Property access where the property name itself is a bound parameter.
    fn dynamic_property(&self, variable: &str, key_placeholder: &str) -> String;

    /// Property access with the property name written into the query text.
    fn inline_property(&self, variable: &str, property: &str) -> String {
        format!("{variable}.{}", self.quote_identifier(property))
    }

    /// Returns the name of the dialect (e.g., "Cypher").
    fn name(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cypher;

impl Dialect for Cypher {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn placeholder(&self, key: &str) -> String {
        format!("${key}")
    }

    fn node_pattern(&self, variable: &str) -> String {
        format!("({variable})")
    }

    fn edge_pattern(&self, variable: &str) -> String {
        format!("()-[{variable}]->()")
    }

    fn has_label(&self, variable: &str, placeholder: &str) -> String {
        format!("{placeholder} IN labels({variable})")
    }

    fn has_type(&self, variable: &str, placeholder: &str) -> String {
        format!("type({variable}) = {placeholder}")
    }

    fn dynamic_property(&self, variable: &str, key_placeholder: &str) -> String {
        format!("{variable}[{key_placeholder}]")
    }

    fn name(&self) -> String {
        "Cypher".into()
    }
}
