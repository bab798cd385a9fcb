//! Snapshot tests for route tree rendering.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use std::str::FromStr;

use gantry_compiler::pipeline::phases::lower_manifest;
use gantry_compiler::surface::{DisplayStyle, RouteTree};
use gantry_ir::ApiSurface;
use gantry_manifest::Manifest;

fn todo_surface() -> ApiSurface {
    let manifest = Manifest::from_str(
        r#"
        [gateway]
        name = "todoApi"

        [routes."/item"]
        description = "Todo collection"
        [routes."/item".methods.GET]
        name = "getAllTodo"
        handler = "app.getAllTodo"
        auth = "none"
        [routes."/item".methods.POST]
        name = "addTodo"
        handler = "app.addToDoItem"
        auth = "none"
        [routes."/item".methods.OPTIONS]
        integration = "mock"

        [routes."/item/{id}".methods.GET]
        name = "getTodo"
        handler = "app.getTodo"
        auth = "none"

        [routes."/item/{id}/done".methods.POST]
        name = "completeTodo"
        handler = "app.completeTodo"
        auth = "none"
    "#,
    )
    .expect("manifest should parse");
    lower_manifest(&manifest)
}

#[test]
fn test_simple_style() {
    let surface = todo_surface();
    let tree = RouteTree::new(&surface);
    let rendered = tree.display_style(DisplayStyle::Simple).indent("").render();
    insta::assert_snapshot!(rendered, @r"
    /item
    /{id}
    /done
    ");
}

#[test]
fn test_with_methods_style() {
    let surface = todo_surface();
    let tree = RouteTree::new(&surface);
    let rendered = tree
        .display_style(DisplayStyle::WithMethods)
        .indent("")
        .render();
    insta::assert_snapshot!(rendered, @r"
    /item [GET, POST, OPTIONS]
    /{id} [GET]
    /done [POST]
    ");
}

#[test]
fn test_with_descriptions_style() {
    let surface = todo_surface();
    let tree = RouteTree::new(&surface);
    let rendered = tree
        .display_style(DisplayStyle::WithDescriptions)
        .indent("")
        .render();
    insta::assert_snapshot!(rendered, @r"
    /item - Todo collection
    /{id} - itemId
    /done - itemIdDone
    ");
}

#[test]
fn test_tree_box_style() {
    let surface = todo_surface();
    let tree = RouteTree::new(&surface);
    let rendered = tree
        .display_style(DisplayStyle::TreeBox)
        .indent("")
        .render();
    insta::assert_snapshot!(rendered, @r"
    └─ /item (3 methods)
       └─ /{id} (1 method)
          └─ /done (1 method)
    ");
}
