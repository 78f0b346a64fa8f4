//! Selection Fixtures

use serde::Deserialize;

use crate::selection::Selection;

/// A stored customer selection in YAML
#[derive(Debug, Deserialize)]
pub struct SelectionFixture {
    /// Main dish id
    #[serde(default)]
    pub main: Option<String>,

    /// Portion name
    #[serde(default)]
    pub portion: Option<String>,

    /// Curries and extras in selection order
    #[serde(default)]
    pub curries: Vec<SelectedFixture>,
}

/// One selected curry or extra
#[derive(Debug, Deserialize)]
pub struct SelectedFixture {
    /// Food id
    pub id: String,

    /// Units selected
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

impl From<SelectionFixture> for Selection {
    fn from(fixture: SelectionFixture) -> Self {
        let mut selection = Selection::new();

        if let Some(main) = fixture.main {
            selection.choose_main(main);
        }

        if let Some(portion) = fixture.portion {
            selection.choose_portion(portion);
        }

        for curry in fixture.curries {
            selection.add(curry.id, curry.quantity);
        }

        selection
    }
}
