//! Architecture and design pattern advice.
use super::first_yes;
use crate::engine::{
    Annotation, Cook, Dish, HandlerRegistry, Kitchen, Level, RecipeError, TemplateRenderer,
};

const CONCERNS: &[&str] = &["unit", "system"];

const SYSTEM_PATTERNS: &[(&str, &str)] = &[
    (
        "Do you build a distributed system",
        "Client-Dispatcher-Server, Broker, Master-Slave, Proxy",
    ),
    (
        "Do you build a system that has user interaction",
        "MVC, Presentation-Abstraction-Control, ViewHandler, Command Processor",
    ),
    (
        "Do you build a system that processes a stream of data",
        "Pipe and Filters",
    ),
    (
        "Do you build a system that requires cooperating components",
        "Forward-Receiver, Publisher-Subscriber",
    ),
];
const SYSTEM_FALLBACK: &str = "Whole-Part, Layers, Blackboard, Microkernel, Reflection, ...";

const UNIT_PATTERNS: &[(&str, &str)] = &[
    (
        "Do you need to create objects or a plugin mechanism",
        "Abstract Factory, Builder, Factory Method, Prototype",
    ),
    (
        "Do you need to handle a hierarchy of objects",
        "Composite, Visitor, Chain of Responsibility",
    ),
    (
        "Do you need a ABI stable or open-closed principle compliant interface",
        "Bridge, Pimpl Idiom (see class recipe for possible implementation)",
    ),
    (
        "Do you need to switch between different implementations of an interface",
        "Bridge",
    ),
    (
        "Do you need to add responsibility to an object dynamically",
        "Decorator",
    ),
    (
        "Do you need to add generic or orthogonal feature to an existing class statically",
        "CRTP Idiom, Parameterized Base Class / Mixin-from-below Idiom, Non-member template function",
    ),
    (
        "Do you need static polymorphism",
        "CRTP Idiom, discriminated union with Visitor",
    ),
    (
        "Do you need to wrap one or many components to make it usable by another one",
        "Adapter, Facade",
    ),
    (
        "Do you need to adapt an interface to make incompatible objects collaborate",
        "Adapter (with CRTP)",
    ),
    (
        "Do you need to define new types that have to meet the requirements of an existing interface",
        "Facade with CRTP",
    ),
    (
        "Do you need to add access control to an existing object (e.g. make a class thread-safe, resilient to network access loss)",
        "Proxy",
    ),
    (
        "Do you need copy-on-write capabilities for performance",
        "Flyweight, Proxy",
    ),
    (
        "Do you need loose-coupling between components",
        "Observer (and variant signal-slot etc.), Mediator",
    ),
    (
        "Do you need do-undo capabilities for a request-based component",
        "Command, Memento",
    ),
    (
        "Do you need to implement a component that processes requests according to its current state",
        "State (Note: you can use libraries that implement the state machine concept)",
    ),
    (
        "Do you need to enforce pre or post conditions in a hierarchy",
        "Template Method (implemented as NVI Idiom in C++)",
    ),
    ("Do you need method chaining in a hierarchy", "CRTP Idiom"),
    (
        "Do you need to create a set of components out of a set of orthogonal concepts",
        "Policy design, Mixins",
    ),
    (
        "Do you need to group a list of overloads (e.g. for visiting)",
        "Variadic Base Class with using directive",
    ),
    (
        "Do you need to regroup natural dependent properties of a type",
        "Traits Class",
    ),
];
const UNIT_FALLBACK: &str = "Check GoF patterns and typical C++ idioms";

#[derive(Debug, Default)]
pub struct DesignCook {
    concern: String,
    pattern: String,
}

impl DesignCook {
    fn primary_concern(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.concern = kitchen.ask_choice(
            "Enter primary concern about the design either whole system design or system unit design (system, unit, default: unit)",
            CONCERNS,
            "unit",
            reference,
        )?;
        Ok(())
    }

    fn system(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.concern == "system" {
            self.pattern =
                first_yes(kitchen, SYSTEM_PATTERNS, SYSTEM_FALLBACK, reference)?.to_string();
        }
        Ok(())
    }

    fn unit(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.concern == "unit" {
            self.pattern = first_yes(kitchen, UNIT_PATTERNS, UNIT_FALLBACK, reference)?.to_string();
        }
        Ok(())
    }
}

impl Cook for DesignCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
            .step("design_root", "primary_concern", Self::primary_concern)
            .step("design_root", "system", Self::system)
            .step("design_root", "unit", Self::unit)
    }

    fn plate(
        &self,
        annotations: &[Annotation],
        _templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError> {
        Ok(Dish::Advice {
            annotations: annotations.to_vec(),
            advice: vec![(
                Level::Suggest,
                format!(
                    "You could consider the following patterns in your design -> {}",
                    self.pattern
                ),
            )],
        })
    }
}
