//! Route tree display formatting.
//!
//! Declarative formatting for the route namespace, used by `check`,
//! `routes`, and `plan` reports.
//!
//! # Example
//!
//! ```ignore
//! let tree = RouteTree::new(&surface);
//! println!("{}", tree.display_style(DisplayStyle::WithMethods).indent("  "));
//! ```

use std::fmt;

use gantry_ir::{ApiSurface, RouteNode};

/// Display style for route trees.
#[derive(Debug, Clone, Copy, Default)]
pub enum DisplayStyle {
    /// Indented path segments only.
    ///
    /// ```text
    /// /item
    ///   /{id}
    ///     /done
    /// ```
    #[default]
    Simple,

    /// Segments with their verbs.
    ///
    /// ```text
    /// /item [GET, POST, OPTIONS]
    ///   /{id} [GET, PUT, DELETE, OPTIONS]
    /// ```
    WithMethods,

    /// Segments with descriptions.
    ///
    /// ```text
    /// /item - Todo collection
    ///   /{id} - itemId
    /// ```
    WithDescriptions,

    /// Tree structure with box-drawing characters and method counts.
    ///
    /// ```text
    /// └─ /item (3 methods)
    ///    └─ /{id} (4 methods)
    /// ```
    TreeBox,
}

/// A navigable view over the surface's route namespace.
#[derive(Debug, Clone)]
pub struct RouteTree<'a> {
    surface: &'a ApiSurface,
}

impl<'a> RouteTree<'a> {
    pub fn new(surface: &'a ApiSurface) -> Self {
        Self { surface }
    }

    /// Number of route nodes in the tree.
    pub fn route_count(&self) -> usize {
        self.surface.routes.len()
    }

    /// Root routes in assembly order.
    pub fn roots(&self) -> Vec<&'a RouteNode> {
        self.surface.routes.iter().filter(|r| r.is_root()).collect()
    }

    /// Direct children of a path, in assembly order.
    pub fn children(&self, path: &str) -> Vec<&'a RouteNode> {
        self.surface
            .routes
            .iter()
            .filter(|r| r.parent_path() == Some(path))
            .collect()
    }

    /// Build a display formatter for this tree.
    pub fn display_style(&'a self, style: DisplayStyle) -> RouteTreeDisplay<'a> {
        RouteTreeDisplay {
            tree: self,
            style,
            indent_str: "  ",
        }
    }
}

/// Declarative route tree display formatter.
#[derive(Debug, Clone)]
pub struct RouteTreeDisplay<'a> {
    tree: &'a RouteTree<'a>,
    style: DisplayStyle,
    indent_str: &'a str,
}

impl<'a> RouteTreeDisplay<'a> {
    /// Set the indentation unit (default: two spaces).
    pub fn indent(mut self, indent: &'a str) -> Self {
        self.indent_str = indent;
        self
    }

    /// Render the route tree to a string.
    pub fn render(&self) -> String {
        let mut output = String::new();
        let roots = self.tree.roots();
        match self.style {
            DisplayStyle::TreeBox => {
                let last = roots.len().saturating_sub(1);
                for (i, route) in roots.iter().enumerate() {
                    self.render_tree_box(&mut output, route, self.indent_str, i == last);
                }
            }
            _ => {
                for route in roots {
                    self.render_indented(&mut output, route, 0);
                }
            }
        }
        output
    }

    fn render_indented(&self, output: &mut String, route: &RouteNode, depth: usize) {
        let indent = format!("{}{}", self.indent_str, self.indent_str.repeat(depth));
        output.push_str(&indent);
        output.push('/');
        output.push_str(route.path_part());
        match self.style {
            DisplayStyle::WithMethods => {
                if !route.methods.is_empty() {
                    let verbs: Vec<&str> =
                        route.methods.iter().map(|(v, _)| v.as_str()).collect();
                    output.push_str(&format!(" [{}]", verbs.join(", ")));
                }
            }
            DisplayStyle::WithDescriptions => {
                output.push_str(" - ");
                output.push_str(&route.description);
            }
            _ => {}
        }
        output.push('\n');

        for child in self.tree.children(&route.path) {
            self.render_indented(output, child, depth + 1);
        }
    }

    fn render_tree_box(
        &self,
        output: &mut String,
        route: &RouteNode,
        prefix: &str,
        is_last: bool,
    ) {
        let connector = if is_last { "└─" } else { "├─" };
        output.push_str(prefix);
        output.push_str(connector);
        output.push_str(" /");
        output.push_str(route.path_part());

        let count = route.methods.len();
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            output.push_str(&format!(" ({count} method{plural})"));
        }
        output.push('\n');

        let children = self.tree.children(&route.path);
        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        let last = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate() {
            self.render_tree_box(output, child, &child_prefix, i == last);
        }
    }
}

impl fmt::Display for RouteTreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
