//! Standard container selection.
use crate::engine::{
    Annotation, Cook, Dish, HandlerRegistry, Kitchen, Level, RecipeError, TemplateRenderer,
};

const CONCERNS: &[&str] = &["random_access", "insertion/removal", "lookup", ""];

#[derive(Debug)]
pub struct DsCook {
    concern: String,
    container: String,
    note: String,
}

impl Default for DsCook {
    fn default() -> Self {
        Self {
            concern: String::new(),
            container: "std::vector".to_string(),
            note: String::new(),
        }
    }
}

impl DsCook {
    fn primary_concern(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        self.concern = kitchen.ask_choice(
            "Enter primary concern about the data structure (random_access, insertion/removal: insert often, traverse rarely, lookup, default: no special concern)",
            CONCERNS,
            "",
            reference,
        )?;
        Ok(())
    }

    fn random_access(
        &mut self,
        kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        if self.concern != "random_access" {
            return Ok(());
        }
        let fixed = kitchen.ask_flag(
            "Is it a fixed size container with size known at compile-time",
            reference,
        )?;
        self.container = if fixed { "std::array" } else { "std::vector" }.to_string();
        Ok(())
    }

    fn insertion_removal(
        &mut self,
        _kitchen: &mut Kitchen<'_>,
        _reference: &str,
    ) -> Result<(), RecipeError> {
        if self.concern == "insertion/removal" {
            self.container = "std::list".to_string();
            self.note =
                "measure first because std::vector may still meet your criteria for reasonable size"
                    .to_string();
        }
        Ok(())
    }

    fn lookup(&mut self, kitchen: &mut Kitchen<'_>, reference: &str) -> Result<(), RecipeError> {
        if self.concern != "lookup" {
            return Ok(());
        }
        let key_value = kitchen.ask_flag(
            "Do you need key-value capable data structure (at the opposite of key-only)",
            reference,
        )?;
        let associative = if kitchen
            .ask_flag("Is readability more important than performance", reference)?
        {
            true
        } else if kitchen.ask_flag(
            "Will size be large and/or will there be frequent insert",
            reference,
        )? {
            self.note =
                "measure first because sorted std::vector may still meet your criteria".to_string();
            true
        } else {
            false
        };

        let container = if associative {
            let ordered =
                kitchen.ask_flag("Do you need ordered keys (no if you don't know)", reference)?;
            match (ordered, key_value) {
                (true, true) => "std::map",
                (true, false) => "std::set",
                (false, true) => "std::unordered_map",
                (false, false) => "std::unordered_set",
            }
        } else if key_value {
            "sorted std::vector of pair"
        } else {
            "sorted std::vector with maintained uniqueness"
        };
        self.container = container.to_string();
        Ok(())
    }
}

impl Cook for DsCook {
    fn registry() -> HandlerRegistry<Self> {
        HandlerRegistry::new()
            .step("ds_root", "primary_concern", Self::primary_concern)
            .step("ds_root", "random_access", Self::random_access)
            .step("ds_root", "insertion_removal", Self::insertion_removal)
            .step("ds_root", "lookup", Self::lookup)
    }

    fn plate(
        &self,
        annotations: &[Annotation],
        _templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError> {
        let mut advice = vec![(
            Level::Suggest,
            format!(
                "You should probably use a data structure of type {}",
                self.container
            ),
        )];
        if !self.note.is_empty() {
            advice.push((Level::Note, self.note.clone()));
        }
        Ok(Dish::Advice {
            annotations: annotations.to_vec(),
            advice,
        })
    }
}
