//! Function skeleton with parameter passing and return type advice.
use super::render_single;
use crate::engine::{
    format_query, Annotation, Cook, Dish, HandlerRegistry, Kitchen, RecipeError, TemplateRenderer,
};
use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::OnceLock;

/// Parameter count from which the function is flagged as doing too much.
const MAX_PARAMS: usize = 4;

fn cstring_regex() -> &'static Regex {
    static CSTRING: OnceLock<Regex> = OnceLock::new();
    CSTRING.get_or_init(|| Regex::new(r"char\s*\*").expect("regex for c strings"))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    #[default]
    Free,
    Method,
}

#[derive(Debug, Default, Clone, Serialize)]
struct Param {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(serialize_with = "join_comments")]
    comments: Vec<String>,
}

#[derive(Debug, Default, Clone, Serialize)]
struct ReturnType {
    rtype: String,
    #[serde(serialize_with = "join_comments")]
    comments: Vec<String>,
}

fn join_comments<S: serde::Serializer>(
    comments: &[String],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&comments.join(","))
}

#[derive(Debug, Default)]
pub struct FunctionCook {
    name: String,
    function_type: FunctionType,
    is_virtual: bool,
    responsibility: String,
    thread_hostile: bool,
    tparam: String,
    tparams: Vec<String>,
    param: Param,
    params: Vec<Param>,
    ret: ReturnType,
    pre: Vec<&'static str>,
    post: Vec<&'static str>,
    pure: bool,
}

impl FunctionCook {
    fn name(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        self.name = kitchen.ask_identifier("Enter function name", reference)?;
        Ok(())
    }

    fn function_type(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.is_virtual = kitchen.ask_flag("Is it a virtual method", reference)?;
        let method = self.is_virtual
            || kitchen.ask_flag(
                "Does it need access to a class internal representation aka a method",
                reference,
            )?;
        self.function_type = if method {
            FunctionType::Method
        } else {
            FunctionType::Free
        };
        Ok(())
    }

    fn responsibility(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.responsibility =
            kitchen.ask_free("Enter function single role/responsibility", reference)?;
        Ok(())
    }

    fn thread_safe(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.thread_hostile = kitchen.ask_flag(
            "Can it cause API races at sites other than its inputs (e.g. static local variable)",
            reference,
        )?;
        Ok(())
    }

    // Virtual methods cannot be templates.
    fn tparam_count(&mut self, kitchen: &mut Kitchen<'_>) -> Result<usize, RecipeError> {
        if self.is_virtual {
            return Ok(0);
        }
        kitchen.ask_count("Enter template parameters count")
    }

    fn tparam_begin(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.tparam.clear();
        Ok(())
    }

    fn tparam_name(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.tparam = kitchen.ask_text(
            "Enter template parameter full desc e.g. typename T, ...",
            reference,
        )?;
        Ok(())
    }

    fn tparam_end(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.tparams.push(std::mem::take(&mut self.tparam));
        Ok(())
    }

    fn param_count(&mut self, kitchen: &mut Kitchen<'_>) -> Result<usize, RecipeError> {
        kitchen.ask_count("Enter regular parameters count")
    }

    fn param_begin(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.param = Param::default();
        Ok(())
    }

    fn param_end(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.params.push(std::mem::take(&mut self.param));
        Ok(())
    }

    /// Show `tip` and let the operator replace the current parameter type.
    fn param_react(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
        tip: &str,
    ) -> Result<(), RecipeError> {
        kitchen.tip(reference, tip)?;
        if kitchen.ask_flag("Would you like to update param type according to tips", reference)? {
            let query = format!("Enter parameter type to replace {}", self.param.ty);
            self.param.ty = kitchen.ask_type(&query, reference)?;
        }
        Ok(())
    }

    fn param_name(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.param.name = kitchen.ask_identifier("Enter parameter name (without type)", reference)?;
        Ok(())
    }

    fn param_type(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.param.ty =
            kitchen.ask_type("Enter parameter type e.g. int, const Obj&, ...", reference)?;
        if !kitchen.ask_flag(
            "Would you like to trigger advanced mode for parameter type fine-tuning",
            reference,
        )? {
            return Ok(());
        }
        let passing = self.passing_advice(kitchen, reference)?;
        self.param_react(kitchen, reference, &format!("pass arg of type X as {passing}"))
    }

    fn passing_advice(
        &self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<&'static str, RecipeError> {
        if kitchen.ask_flag("Is it an in-out param", reference)? {
            return Ok("X&");
        }
        if kitchen.ask_flag(
            "Will the arg be passed onward to other code and not directly used by this function",
            reference,
        )? {
            return Ok("T&& + std::forward");
        }
        if kitchen.ask_flag("Is it cheap to copy e.g. int, pointer, smart pointers", reference)?
            || self.param.ty.contains("unique_ptr")
        {
            return Ok("X");
        }
        if !kitchen.ask_flag("Is it going to be stored or moved", reference)? {
            return Ok("const X&");
        }
        if kitchen.ask_flag("Will it be unconditionally moved", reference)? {
            return Ok("X&&");
        }
        if !kitchen.ask_flag("Will it be copied", reference)? {
            return Ok("const X&");
        }
        if kitchen.ask_flag("Is it expensive to move (e.g. bigPOD, large array)", reference)? {
            return Ok("const X&");
        }
        if kitchen.ask_flag(
            "Is it copyable, copied on all paths, cheap to move (e.g. std::string, std::vector) and move constructed",
            reference,
        )? {
            return Ok("X");
        }
        Ok("const X& + X&& overloads or T&& + std::forward")
    }

    fn weak_type(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.param.ty.contains("void") {
            self.param_react(kitchen, reference, "void is a weak type")?;
        }
        Ok(())
    }

    fn array(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        let pointer_like = self.param.ty.contains('*') || self.param.ty.contains("[]");
        if pointer_like && kitchen.ask_flag("Does the param represent an array", reference)? {
            self.param_react(kitchen, reference, "array should be passed as std::array or span")?;
        }
        Ok(())
    }

    fn smart_pointer(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        let smart = self.param.ty.contains("shared_ptr") || self.param.ty.contains("unique_ptr");
        if smart && !kitchen.ask_flag("Will ownership be transferred or shared", reference)? {
            self.param_react(kitchen, reference, "T* or T& is better for general use")?;
        }
        Ok(())
    }

    fn cstring(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if cstring_regex().is_match(&self.param.ty) {
            self.param_react(kitchen, reference, "consider alternative like string_view")?;
        }
        Ok(())
    }

    fn collision(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        let same_as_previous = self
            .params
            .last()
            .is_some_and(|previous| previous.ty == self.param.ty);
        if same_as_previous {
            self.param_react(kitchen, reference, "same type as previous param can be confusing")?;
        }
        Ok(())
    }

    fn bool_list(
        &mut self,
        _kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.param.ty == "bool" && self.params.iter().any(|param| param.ty == "bool") {
            self.param.comments.push(format_query(
                "more than one bool param, consider using flags",
                reference,
            ));
        }
        Ok(())
    }

    fn args_count(
        &mut self,
        _kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.params.len() >= MAX_PARAMS {
            self.param.comments.push(format_query(
                "more than 4 params, maybe missing an abstraction or function has too many responsibilities",
                reference,
            ));
        }
        Ok(())
    }

    fn ret_begin(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.ret = ReturnType::default();
        Ok(())
    }

    /// Show `tip`; either replace the return type or keep the tip as a comment.
    fn ret_react(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
        tip: &str,
    ) -> Result<(), RecipeError> {
        kitchen.tip(reference, tip)?;
        if kitchen.ask_flag("Would you like to update return type according to tips", reference)? {
            self.ret.rtype = kitchen.ask_type("Enter return type", reference)?;
        } else {
            self.ret.comments.push(format_query(tip, reference));
        }
        Ok(())
    }

    fn ret_type(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        self.ret.rtype = kitchen.ask_type("Enter return type", reference)?;
        Ok(())
    }

    fn ret_ownership(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.ret.rtype.contains('*')
            && kitchen.ask_flag("Is it a transfer of ownership", reference)?
        {
            self.ret_react(
                kitchen,
                reference,
                "beware ownership transferred with raw pointer, consider smart pointer",
            )?;
        }
        Ok(())
    }

    fn ret_by_value(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.ret.rtype == "void" {
            return Ok(());
        }
        let needs_reference = kitchen.ask_flag(
            "Does it return a container item, enable write access to some representation, or enable chain calls",
            reference,
        )?;
        let indirect = self.ret.rtype.contains('*') || self.ret.rtype.contains('&');
        if needs_reference && (self.ret.rtype == "auto" || !indirect) {
            self.ret_react(
                kitchen,
                reference,
                "you should not return by value (e.g. auto -> decltype(auto))",
            )?;
        } else if !needs_reference && indirect {
            self.ret_react(kitchen, reference, "prefer return by value if suitable")?;
        }
        Ok(())
    }

    fn ret_non_const(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.ret.rtype.contains("const") {
            self.ret_react(kitchen, reference, "move semantics could be suppressed by 'const'")?;
        }
        Ok(())
    }

    fn ret_rvalue_ref(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.ret.rtype.contains("&&") {
            self.ret_react(kitchen, reference, "never return &&")?;
        }
        Ok(())
    }

    fn attr_begin(&mut self, _kitchen: &mut Kitchen<'_>) -> Result<(), RecipeError> {
        self.pre.clear();
        self.post.clear();
        Ok(())
    }

    fn attr_virtual(
        &mut self,
        _kitchen: &mut Kitchen<'_>,
        _reference: &str,
    ) -> Result<(), RecipeError> {
        if self.is_virtual {
            self.pre.push("virtual");
        }
        Ok(())
    }

    fn attr_constexpr(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if !self.is_virtual
            && kitchen.ask_flag("Should it be evaluated at compile-time", reference)?
        {
            self.pre.push("constexpr");
        }
        Ok(())
    }

    fn attr_inline(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        let candidate =
            !self.is_virtual && !self.pre.contains(&"constexpr") && self.tparams.is_empty();
        if candidate
            && kitchen.ask_flag(
                "Is it small, time-critical and part of a thin abstraction",
                reference,
            )?
        {
            self.pre.push("inline");
        }
        Ok(())
    }

    fn attr_const(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.function_type == FunctionType::Method
            && !kitchen.ask_flag("Will the method modify the object state", reference)?
        {
            self.post.push("const");
        }
        Ok(())
    }

    fn attr_noexcept(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if !kitchen.ask_flag("Can it throw exceptions", reference)? {
            self.post.push("noexcept");
        }
        Ok(())
    }

    fn attr_override(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.is_virtual
            && kitchen.ask_flag("Does the function override a base method behavior", reference)?
        {
            self.post.push("override");
            self.pre.retain(|attr| *attr != "virtual");
        }
        Ok(())
    }

    fn pure(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        let candidate = self.tparams.is_empty()
            && self.function_type == FunctionType::Method
            && self.pre.contains(&"virtual");
        self.pure = candidate && kitchen.ask_flag("Is it pure", reference)?;
        Ok(())
    }
}

impl Cook for FunctionCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
            .step("func_root", "name", Self::name)
            .step("func_root", "type", Self::function_type)
            .step("func_root", "responsibility", Self::responsibility)
            .step("func_root", "thread_safe", Self::thread_safe)
            .repeat("tpl_parameters", Self::tparam_count)
            .initialize("tpl_parameters", Self::tparam_begin)
            .step("tpl_parameters", "name", Self::tparam_name)
            .finalize("tpl_parameters", Self::tparam_end)
            .repeat("func_parameters", Self::param_count)
            .initialize("func_parameters", Self::param_begin)
            .step("func_parameters", "name", Self::param_name)
            .step("func_parameters", "type", Self::param_type)
            .step("func_parameters", "weaktype", Self::weak_type)
            .step("func_parameters", "array", Self::array)
            .step("func_parameters", "smartpointer", Self::smart_pointer)
            .step("func_parameters", "cstring", Self::cstring)
            .step("func_parameters", "collision", Self::collision)
            .step("func_parameters", "boollist", Self::bool_list)
            .step("func_parameters", "argscount", Self::args_count)
            .finalize("func_parameters", Self::param_end)
            .initialize("func_ret", Self::ret_begin)
            .step("func_ret", "type", Self::ret_type)
            .step("func_ret", "ownership", Self::ret_ownership)
            .step("func_ret", "byvalue", Self::ret_by_value)
            .step("func_ret", "nonconst", Self::ret_non_const)
            .step("func_ret", "rvalueref", Self::ret_rvalue_ref)
            .initialize("func_attr", Self::attr_begin)
            .step("func_attr", "virtual", Self::attr_virtual)
            .step("func_attr", "constexpr", Self::attr_constexpr)
            .step("func_attr", "inline", Self::attr_inline)
            .step("func_attr", "const", Self::attr_const)
            .step("func_attr", "noexcept", Self::attr_noexcept)
            .step("func_attr", "override", Self::attr_override)
            .step("func_impl", "pure", Self::pure)
    }

    fn plate(
        &self,
        annotations: &[Annotation],
        templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError> {
        let tparams: Vec<_> = self.tparams.iter().map(|name| json!({ "name": name })).collect();
        let function_type = match self.function_type {
            FunctionType::Free => "free",
            FunctionType::Method => "method",
        };
        let context = json!({
            "annotations": annotations,
            "name": self.name,
            "type": function_type,
            "responsibility": self.responsibility,
            "thread_hostile": self.thread_hostile,
            "tparams": tparams,
            "params": self.params,
            "ret": self.ret,
            "attr": {
                "pre": self.pre.join(" "),
                "post": self.post.join(" "),
            },
            "pure": self.pure,
        });
        render_single(templates, "function.h", &context, true)
    }
}

#[cfg(test)]
#[path = "function_tests.rs"]
mod tests;
