//! Standard algorithm selection.
use super::first_yes;
use crate::engine::{
    Annotation, Cook, Dish, HandlerRegistry, Kitchen, Level, RecipeError, TemplateRenderer,
};

const CONCERNS: &[&str] = &["find", "sort", "traversal"];

const SORT_ALGORITHMS: &[(&str, &str)] = &[
    (
        "Do you need to separate data according to a criteria",
        "std::partition or std::stable_partition if relative order of items should be preserved",
    ),
    (
        "Do you need to know the value of the nth element if the data structure was sorted with all others correctly dispatched around it",
        "std::nth_element",
    ),
    (
        "Do you need to sort part of a data structure",
        "std::partial_sort",
    ),
];

#[derive(Debug, Default)]
pub struct AlgoCook {
    concern: String,
    algorithms: String,
}

impl AlgoCook {
    fn primary_concern(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.concern = kitchen.ask_choice(
            "Enter primary concern about the algorithm (find, sort, traversal, default: find)",
            CONCERNS,
            "find",
            reference,
        )?;
        Ok(())
    }

    fn find(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.concern != "find" {
            return Ok(());
        }
        self.algorithms = if kitchen.ask_flag("Do you need to search a sorted range", reference)? {
            "std::binary_search, std::lower_bound, std::upper_bound or std::equal_range"
        } else {
            "std::find, std::find_if or custom find member if available"
        }
        .to_string();
        Ok(())
    }

    fn sort(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.concern == "sort" {
            self.algorithms =
                first_yes(kitchen, SORT_ALGORITHMS, "std::sort or std::stable_sort", reference)?
                    .to_string();
        }
        Ok(())
    }

    fn traversal(
        &mut self,
        _kitchen: &mut Kitchen<'_>,
        _reference: &str,
    ) -> Result<(), RecipeError> {
        if self.concern == "traversal" {
            self.algorithms =
                "std::for_each or custom range-based for loop if more convenient".to_string();
        }
        Ok(())
    }
}

impl Cook for AlgoCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
            .step("algo_root", "primary_concern", Self::primary_concern)
            .step("algo_root", "find", Self::find)
            .step("algo_root", "sort", Self::sort)
            .step("algo_root", "traversal", Self::traversal)
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
                    "You should probably use one of the following algorithms -> {}",
                    self.algorithms
                ),
            )],
        })
    }
}
