//! Quantities shared by the cast-in-place concrete measurements
//! (foundations and structural members).

use serde::{Deserialize, Serialize};

use super::slab::SlabQuantities;
use crate::formulas::concrete;
use crate::guard::non_negative;

/// Which concrete element a quantity set describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcreteElement {
    /// Mat foundation under the whole footprint
    Radier,
    StripFooting,
    IsolatedFooting,
    Beam,
    Column,
    StructuralSlab,
}

impl ConcreteElement {
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteElement::Radier => "Radier (mat foundation)",
            ConcreteElement::StripFooting => "Strip footing",
            ConcreteElement::IsolatedFooting => "Isolated footing",
            ConcreteElement::Beam => "Beam",
            ConcreteElement::Column => "Column",
            ConcreteElement::StructuralSlab => "Structural slab",
        }
    }
}

impl std::fmt::Display for ConcreteElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Concrete, reinforcement and formwork for one element group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteQuantities {
    pub element: ConcreteElement,
    /// Number of pieces (footings, columns); 1 for continuous elements
    pub count: usize,
    /// Run length of beams and strip footings, summed height of columns (m)
    pub length_m: f64,
    /// Plan area (m²)
    pub plan_area_m2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_area_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_m: Option<f64>,
    pub volume_m3: f64,
    pub rebar_rate_kg_m3: f64,
    pub rebar_kg: f64,
    pub concrete_weight_kg: f64,
    /// Contact formwork; `None` when the section shape is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formwork_m2: Option<f64>,
}

impl ConcreteQuantities {
    pub(crate) fn new(element: ConcreteElement, count: usize) -> Self {
        ConcreteQuantities {
            element,
            count,
            length_m: 0.0,
            plan_area_m2: 0.0,
            section_area_m2: None,
            thickness_m: None,
            volume_m3: 0.0,
            rebar_rate_kg_m3: 0.0,
            rebar_kg: 0.0,
            concrete_weight_kg: 0.0,
            formwork_m2: None,
        }
    }

    /// A plate element (mat, structural slab) from slab quantities
    pub(crate) fn from_plate(element: ConcreteElement, plate: SlabQuantities) -> Self {
        ConcreteQuantities {
            plan_area_m2: plate.area_m2,
            thickness_m: Some(plate.thickness_m),
            volume_m3: plate.volume_m3,
            rebar_rate_kg_m3: plate.rebar_rate_kg_m3,
            rebar_kg: plate.rebar_kg,
            concrete_weight_kg: plate.concrete_weight_kg,
            formwork_m2: Some(plate.edge_formwork_m2),
            ..ConcreteQuantities::new(element, 1)
        }
    }

    /// Guard geometric fields and derive reinforcement and weight from the volume
    pub(crate) fn reinforce(mut self, rebar_rate: f64, density: f64) -> Self {
        self.length_m = non_negative("concrete.length_m", self.length_m);
        self.plan_area_m2 = non_negative("concrete.plan_area_m2", self.plan_area_m2);
        self.section_area_m2 = self.section_area_m2.map(|a| non_negative("concrete.section_area_m2", a));
        self.volume_m3 = non_negative("concrete.volume_m3", self.volume_m3);
        self.formwork_m2 = self.formwork_m2.map(|a| non_negative("concrete.formwork_m2", a));
        self.rebar_rate_kg_m3 = rebar_rate;
        self.rebar_kg = non_negative("concrete.rebar_kg", concrete::rebar_weight(self.volume_m3, rebar_rate));
        self.concrete_weight_kg = non_negative(
            "concrete.concrete_weight_kg",
            concrete::concrete_weight(self.volume_m3, density),
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinforce_clamps_and_derives() {
        let mut q = ConcreteQuantities::new(ConcreteElement::Beam, 1);
        q.volume_m3 = 2.0;
        q.formwork_m2 = Some(-1.0);
        let q = q.reinforce(100.0, 2400.0);
        assert_eq!(q.rebar_kg, 200.0);
        assert_eq!(q.concrete_weight_kg, 4800.0);
        assert_eq!(q.formwork_m2, Some(0.0));
    }

    #[test]
    fn test_element_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ConcreteElement::IsolatedFooting).unwrap(),
            "\"isolated_footing\""
        );
    }
}
