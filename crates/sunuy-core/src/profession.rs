use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Trade vocabulary shared by the directory and the application forms.
///
/// The serde representation is the French label shown to users, which is
/// also the exact string the `metier` filter compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    #[serde(rename = "Menuisier Bois")]
    MenuisierBois,
    #[serde(rename = "Maçon")]
    Macon,
    #[serde(rename = "Plombier")]
    Plombier,
    #[serde(rename = "Électricien")]
    Electricien,
    #[serde(rename = "Carreleur")]
    Carreleur,
    #[serde(rename = "Peintre")]
    Peintre,
    #[serde(rename = "Mécanicien")]
    Mecanicien,
    #[serde(rename = "Climatisation")]
    Climatisation,
    #[serde(rename = "Tapisserie")]
    Tapisserie,
    #[serde(rename = "Électroménager")]
    Electromenager,
    #[serde(rename = "Restauration")]
    Restauration,
    #[serde(rename = "Agroalimentaire")]
    Agroalimentaire,
    #[serde(rename = "Ameublement")]
    Ameublement,
    #[serde(rename = "Confection couture")]
    ConfectionCouture,
    #[serde(rename = "Maroquinerie")]
    Maroquinerie,
    #[serde(rename = "Blanchisserie")]
    Blanchisserie,
    #[serde(rename = "Cordonnerie")]
    Cordonnerie,
    #[serde(rename = "Menuiserie métallique")]
    MenuiserieMetallique,
    #[serde(rename = "Menuiserie aluminium")]
    MenuiserieAluminium,
    #[serde(rename = "Bijouterie")]
    Bijouterie,
    /// Form-only choice; never valid on a catalog record.
    #[serde(rename = "Autre")]
    Autre,
}

impl Profession {
    /// Trades a directory record may carry, in display order.
    pub const LISTED: [Profession; 20] = [
        Profession::MenuisierBois,
        Profession::Macon,
        Profession::Plombier,
        Profession::Electricien,
        Profession::Carreleur,
        Profession::Peintre,
        Profession::Mecanicien,
        Profession::Climatisation,
        Profession::Tapisserie,
        Profession::Electromenager,
        Profession::Restauration,
        Profession::Agroalimentaire,
        Profession::Ameublement,
        Profession::ConfectionCouture,
        Profession::Maroquinerie,
        Profession::Blanchisserie,
        Profession::Cordonnerie,
        Profession::MenuiserieMetallique,
        Profession::MenuiserieAluminium,
        Profession::Bijouterie,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Profession::MenuisierBois => "Menuisier Bois",
            Profession::Macon => "Maçon",
            Profession::Plombier => "Plombier",
            Profession::Electricien => "Électricien",
            Profession::Carreleur => "Carreleur",
            Profession::Peintre => "Peintre",
            Profession::Mecanicien => "Mécanicien",
            Profession::Climatisation => "Climatisation",
            Profession::Tapisserie => "Tapisserie",
            Profession::Electromenager => "Électroménager",
            Profession::Restauration => "Restauration",
            Profession::Agroalimentaire => "Agroalimentaire",
            Profession::Ameublement => "Ameublement",
            Profession::ConfectionCouture => "Confection couture",
            Profession::Maroquinerie => "Maroquinerie",
            Profession::Blanchisserie => "Blanchisserie",
            Profession::Cordonnerie => "Cordonnerie",
            Profession::MenuiserieMetallique => "Menuiserie métallique",
            Profession::MenuiserieAluminium => "Menuiserie aluminium",
            Profession::Bijouterie => "Bijouterie",
            Profession::Autre => "Autre",
        }
    }

    /// `false` only for [`Profession::Autre`].
    #[must_use]
    pub fn is_listed(self) -> bool {
        self != Profession::Autre
    }
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profession {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profession::LISTED
            .iter()
            .chain(std::iter::once(&Profession::Autre))
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::UnknownProfession(s.to_string()))
    }
}
