//! Class skeleton: concrete (regular or pimpl) or hierarchy member.
use crate::engine::{
    Annotation, Cook, Dish, HandlerRegistry, Kitchen, RecipeError, RenderedFile, TemplateRenderer,
};
use serde_json::json;

const THREAD_SAFETY: &[&str] = &["thread-safe", "thread-compatible", "thread-incompatible"];
const CLASS_TYPES: &[&str] = &["concrete", "hierarchy"];
const ABSTRACTIONS: &[&str] = &["thin", "thick", "verythick"];

/// Abstraction level that moves the representation behind a pointer.
const PIMPL: &str = "verythick";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum ClassType {
    #[default]
    Concrete,
    Hierarchy,
}

impl ClassType {
    fn as_str(self) -> &'static str {
        match self {
            ClassType::Concrete => "concrete",
            ClassType::Hierarchy => "hierarchy",
        }
    }
}

#[derive(Debug, Default)]
pub struct ClassCook {
    name: String,
    responsibility: String,
    invariant: String,
    thread_safety: String,
    class_type: ClassType,
    tparam: String,
    tparams: Vec<String>,
    abstraction: String,
    raii: bool,
    specials: bool,
    custom_allocators: bool,
    init_list_ctor: bool,
    base: bool,
    basename: String,
    clonable: bool,
    interface: bool,
    init_with_base: bool,
}

impl ClassCook {
    fn has_impl(&self) -> bool {
        self.class_type == ClassType::Concrete && self.abstraction == PIMPL
    }

    fn name(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        self.name = kitchen.ask_identifier("Enter class name", reference)?;
        Ok(())
    }

    fn responsibility(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.responsibility =
            kitchen.ask_free("Enter class single role/responsibility", reference)?;
        Ok(())
    }

    fn invariant(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        self.invariant = kitchen.ask_free("Enter class invariants description", reference)?;
        Ok(())
    }

    fn thread_safe(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.thread_safety = kitchen.ask_choice(
            "Enter thread-safety contract (thread-safe: no api race, thread-compatible: no api race if not mutated, thread-incompatible, default: thread-incompatible)",
            THREAD_SAFETY,
            "thread-incompatible",
            reference,
        )?;
        if self.thread_safety == "thread-safe" {
            kitchen.annotate(
                "CON",
                reference,
                "a thread-safe class synchronizes every access to its mutable state",
            )?;
        }
        Ok(())
    }

    fn class_type(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        let answer = kitchen.ask_choice(
            "Enter class type (concrete, hierarchy, default: concrete)",
            CLASS_TYPES,
            "concrete",
            reference,
        )?;
        self.class_type = if answer == "hierarchy" {
            ClassType::Hierarchy
        } else {
            ClassType::Concrete
        };
        Ok(())
    }

    fn tparam_count(&mut self, kitchen: &mut Kitchen<'_>) -> Result<usize, RecipeError> {
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

    fn abstraction(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.class_type != ClassType::Concrete {
            return Ok(());
        }
        // A pimpl cannot hide a template definition.
        self.abstraction = if self.tparams.is_empty() {
            kitchen.ask_choice(
                "Enter class abstraction (verythick for pimpl, thick for no-inline, thin otherwise, default: thin)",
                ABSTRACTIONS,
                "thin",
                reference,
            )?
        } else {
            "thin".to_string()
        };
        Ok(())
    }

    fn raii(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.class_type != ClassType::Concrete {
            return Ok(());
        }
        self.raii = self.abstraction != PIMPL
            && kitchen.ask_flag(
                "Does the class acquire-release a resource at construction/destruction",
                reference,
            )?;
        Ok(())
    }

    fn specials(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.class_type != ClassType::Concrete {
            return Ok(());
        }
        self.specials = self.abstraction == PIMPL
            || self.raii
            || kitchen.ask_flag("Should one of the special members be defined", reference)?;
        Ok(())
    }

    fn alloc(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.class_type == ClassType::Concrete {
            self.custom_allocators = kitchen.ask_flag(
                "Does the class need custom allocation/deallocation overloads",
                reference,
            )?;
        }
        Ok(())
    }

    fn init_list_ctor(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.class_type == ClassType::Concrete {
            self.init_list_ctor =
                kitchen.ask_flag("Does the class need an initializer list ctor", reference)?;
        }
        Ok(())
    }

    fn base(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.class_type != ClassType::Hierarchy {
            return Ok(());
        }
        self.base = kitchen.ask_flag("Is it the base class in hierarchy", reference)?;
        if !self.base {
            self.basename = kitchen.ask_identifier("Enter the main base class name", reference)?;
        }
        Ok(())
    }

    fn clonable(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.class_type == ClassType::Hierarchy {
            self.clonable = kitchen.ask_flag("Is it part of a clonable hierarchy", reference)?;
        }
        Ok(())
    }

    fn interface(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.class_type == ClassType::Hierarchy && self.base {
            self.interface = kitchen.ask_flag(
                "Does the hierarchy need a complete separation of interface",
                reference,
            )?;
        }
        Ok(())
    }

    fn inherited_init(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.class_type == ClassType::Hierarchy && !self.base {
            self.init_with_base = !kitchen.ask_flag(
                "Does the class need specific initialization (data members, ...)",
                reference,
            )?;
        }
        Ok(())
    }
}

impl Cook for ClassCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
            .step("class_root", "name", Self::name)
            .step("class_root", "responsibility", Self::responsibility)
            .step("class_root", "invariant", Self::invariant)
            .step("class_root", "thread_safe", Self::thread_safe)
            .step("class_root", "type", Self::class_type)
            .repeat("tpl_parameters", Self::tparam_count)
            .initialize("tpl_parameters", Self::tparam_begin)
            .step("tpl_parameters", "name", Self::tparam_name)
            .finalize("tpl_parameters", Self::tparam_end)
            .step("concrete", "abstraction", Self::abstraction)
            .step("concrete", "raii", Self::raii)
            .step("concrete", "specials", Self::specials)
            .step("concrete", "alloc", Self::alloc)
            .step("concrete", "init_list_ctor", Self::init_list_ctor)
            .step("hierarchy", "base", Self::base)
            .step("hierarchy", "clonable", Self::clonable)
            .step("hierarchy", "interface", Self::interface)
            .step("hierarchy", "inherited_init", Self::inherited_init)
    }

    fn plate(
        &self,
        annotations: &[Annotation],
        templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError> {
        let tparams: Vec<_> = self.tparams.iter().map(|name| json!({ "name": name })).collect();
        let context = json!({
            "annotations": annotations,
            "classname": self.name,
            "responsibility": self.responsibility,
            "invariant": self.invariant,
            "thread_safety": self.thread_safety,
            "type": self.class_type.as_str(),
            "tparams": tparams,
            "abstraction": self.abstraction,
            "raii": self.raii,
            "specials": self.specials,
            "custom_allocators": self.custom_allocators,
            "init_list_ctor": self.init_list_ctor,
            "base": self.base,
            "basename": self.basename,
            "clonable": self.clonable,
            "interface": self.interface,
            "init_with_base": self.init_with_base,
        });

        let mut names = vec![format!("{}_class.h", self.class_type.as_str())];
        if self.has_impl() {
            names.push(format!("{}_class.cpp", self.class_type.as_str()));
        }
        let files = names
            .into_iter()
            .map(|name| {
                let content = templates.render(&name, &context)?;
                Ok(RenderedFile { name, content })
            })
            .collect::<Result<Vec<_>, RecipeError>>()?;
        Ok(Dish::Rendered {
            files,
            writable: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dishes::test_support::{cook_scripted, rendered};
    use crate::dishes::DishKind;

    #[test]
    fn thin_concrete_class_is_a_single_header() {
        let (dish, _) = cook_scripted(
            DishKind::Class,
            &["Widget", "draws widgets", "", "", "", "0", "", "n", "n", "n", "n"],
        );
        assert!(dish.is_writable());
        let files = rendered(&dish);
        assert_eq!(files.len(), 1);
        let (name, header) = &files[0];
        assert_eq!(name, "concrete_class.h");
        assert!(header.contains("class Widget {"));
        assert!(header.contains("/// \\brief draws widgets"));
        assert!(header.contains("/// \\note thread-safety: thread-incompatible"));
        assert!(header.contains("rule of zero"));
        assert!(!header.contains("std::unique_ptr<Impl>"));
    }

    #[test]
    fn pimpl_class_adds_an_implementation_file() {
        let (dish, shown) = cook_scripted(
            DishKind::Class,
            &["Engine", "", "", "thread-safe", "concrete", "0", "verythick", "n", "n"],
        );
        assert!(!shown.contains("acquire-release a resource"));
        assert!(!shown.contains("special members be defined"));
        let files = rendered(&dish);
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["concrete_class.h", "concrete_class.cpp"]);
        assert!(files[0].1.contains("std::unique_ptr<Impl> _impl;"));
        assert!(files[0].1.contains("~Engine();"));
        assert!(files[1].1.contains("Engine::~Engine() = default;"));
        assert!(files[0].1.contains(
            "// CON [abseil.tips.thread_safety]: a thread-safe class synchronizes every access to its mutable state"
        ));
    }

    #[test]
    fn template_parameters_force_a_thin_abstraction() {
        let (dish, shown) = cook_scripted(
            DishKind::Class,
            &["Buffer", "", "", "", "", "2", "typename T", "std::size_t N", "y", "n", "n"],
        );
        assert!(!shown.contains("Enter class abstraction"));
        let header = &rendered(&dish)[0].1;
        assert!(header.contains("template <typename T, std::size_t N>"));
        assert!(header.contains("Buffer(const Buffer&) = delete;"));
    }

    #[test]
    fn derived_hierarchy_class_names_its_base() {
        let (dish, shown) = cook_scripted(
            DishKind::Class,
            &["Circle", "", "", "", "hierarchy", "0", "n", "Shape", "y", "n"],
        );
        assert!(!shown.contains("complete separation of interface"));
        assert!(!shown.contains("Enter class abstraction"));
        let files = rendered(&dish);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "hierarchy_class.h");
        let header = &files[0].1;
        assert!(header.contains("class Circle : public Shape /*, ...*/ {"));
        assert!(header.contains("using Shape::Shape;"));
        assert!(header.contains("    Circle(const Circle&) = default;"));
        assert!(header.contains("        return new Circle(*this);"));
        assert!(!header.contains("class ClonableBase"));
    }

    #[test]
    fn invalid_class_name_is_asked_again() {
        let (dish, shown) = cook_scripted(
            DishKind::Class,
            &["2fast", "Fast", "", "", "", "", "-1", "", "n", "n", "n", "n"],
        );
        assert!(shown.contains("ERROR: expecting cpp identifier"));
        assert!(rendered(&dish)[0].1.contains("class Fast {"));
    }
}
