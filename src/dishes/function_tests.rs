use crate::dishes::test_support::{cook_scripted, rendered};
use crate::dishes::DishKind;

fn header(answers: &[&str]) -> (String, String) {
    let (dish, shown) = cook_scripted(DishKind::Function, answers);
    assert!(dish.is_writable());
    let files = rendered(&dish);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "function.h");
    (files[0].1.clone(), shown)
}

#[test]
fn constexpr_free_function() {
    let (header, _) = header(&[
        "area", "n", "n", "compute area", "n", "0", "1", "radius", "double", "n", "double", "n",
        "y", "n",
    ]);
    assert!(header.contains("/// \\brief compute area"));
    assert!(header.contains("/// \\param radius TODO"));
    assert!(header.contains("/// \\return TODO"));
    assert!(!header.contains("/// \\throw"));
    assert!(header.contains("constexpr double area(\n    double radius\n) noexcept {"));
    assert!(!header.contains("Invariant check"));
}

#[test]
fn pure_virtual_const_method() {
    let (header, shown) = header(&["draw", "y", "", "n", "0", "", "n", "n", "y", "n", "y"]);
    assert!(!shown.contains("Enter template parameters count"));
    assert!(!shown.contains("class internal representation"));
    assert!(header.contains("virtual auto draw(\n) const = 0;"));
    assert!(!header.contains("Preconditions"));
}

#[test]
fn override_drops_virtual_and_skips_pure() {
    let (header, shown) = header(&["draw", "y", "", "n", "0", "void", "n", "n", "y"]);
    assert!(!shown.contains("Is it pure"));
    assert!(header.contains(" void draw(\n) const noexcept override {"));
    assert!(header.contains("an override never weakens the postconditions"));
}

#[test]
fn repeated_bool_params_are_commented() {
    let (header, shown) = header(&[
        "f", "n", "n", "", "n", "0", "2", "a", "bool", "n", "b", "bool", "n", "n", "void", "n",
        "n", "n",
    ]);
    assert!(shown.contains(
        "(!) TIPS [cppcore.I.24]: same type as previous param can be confusing"
    ));
    assert!(header.contains("    bool a,\n"));
    assert!(header.contains(
        "    bool b /* WARNING: more than one bool param, consider using flags [ref: cppcore.I.4] */\n"
    ));
    assert!(!header.contains("/// \\return"));
}

#[test]
fn tips_can_replace_parameter_and_return_types() {
    let (header, shown) = header(&[
        "g",
        "n",
        "n",
        "",
        "n",
        "0",
        "1",
        "x",
        "int",
        "y",
        "n",
        "n",
        "y",
        "y",
        "long",
        "const std::string&",
        "n",
        "y",
        "std::string",
        "n",
        "n",
        "y",
    ]);
    assert!(shown.contains("(!) TIPS [cppcore.F.15]: pass arg of type X as X"));
    assert!(shown.contains(
        "Enter parameter type to replace int (default: auto) [ref: cppcore.F.15]: "
    ));
    assert!(shown.contains("(!) TIPS [cppcore.F.44]: prefer return by value if suitable"));
    assert!(header.contains(" std::string g(\n    long x\n)  {"));
    assert!(header.contains("/// \\throw TODO"));
}

#[test]
fn declined_return_tip_becomes_a_comment() {
    let (header, _) = header(&[
        "make", "n", "n", "", "n", "0", "0", "Widget*", "y", "n", "n", "n", "n", "n", "n",
    ]);
    assert!(header.contains(
        "// NOTE (return type): beware ownership transferred with raw pointer, consider smart pointer [ref: cppcore.F.26]"
    ));
    assert!(header.contains(
        "consider smart pointer [ref: cppcore.F.26],prefer return by value if suitable [ref: cppcore.F.44]"
    ));
    assert!(header.contains(" Widget* make(\n) noexcept {"));
}

#[test]
fn c_string_parameter_gets_a_tip() {
    let (_, shown) = header(&[
        "log", "n", "n", "", "y", "0", "1", "msg", "const char *", "n", "n", "n", "void", "n",
        "n", "y",
    ]);
    assert!(shown.contains("(!) TIPS [cppcore.SL.str.2]: consider alternative like string_view"));
}
