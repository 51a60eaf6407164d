//! Fusion partner expansion.

use std::collections::{BTreeSet, HashMap};

use log::{info, warn};
use rayon::prelude::*;

use genelist_core::errors::PartnerError;
use genelist_core::models::{Class, Entity};
use genelist_core::traits::PartnerLookup;

/// One entity's expansion: its partners followed by the entity itself.
#[derive(Debug)]
pub struct PartnerExpansion {
    pub entities: Vec<Entity>,
    pub error: Option<PartnerError>,
}

/// Output of expanding a batch of entities.
#[derive(Debug, Default)]
pub struct Expanded {
    pub entities: Vec<Entity>,
    pub errors: Vec<(String, PartnerError)>,
}

///
/// Expand a single entity into its fusion partners.
///
/// Entities that do not ask for partners are passed through unchanged. On
/// a failed lookup the entity is still kept and the error is returned next
/// to it.
///
pub fn expand<P: PartnerLookup>(entity: &Entity, lookup: &P) -> PartnerExpansion {
    if !entity.wants_partners() {
        return PartnerExpansion {
            entities: vec![entity.clone()],
            error: None,
        };
    }

    match lookup.partners(&entity.id) {
        Ok(partners) => {
            let partners: BTreeSet<String> = partners
                .into_iter()
                .filter(|p| *p != entity.id)
                .collect();
            info!("Found {} partner(s) for {}", partners.len(), entity.id);

            let mut entities: Vec<Entity> = partners
                .iter()
                .map(|p| Entity::sv_partner(p, entity.tables.clone()))
                .collect();
            entities.push(entity.clone());

            PartnerExpansion {
                entities,
                error: None,
            }
        }
        Err(err) => {
            warn!("Could not expand partners of {}: {}", entity.id, err);
            PartnerExpansion {
                entities: vec![entity.clone()],
                error: Some(err),
            }
        }
    }
}

///
/// Expand every entity on the current rayon pool.
///
/// Output keeps input order. An entity appearing more than once (for example
/// a partner shared by two genes, or a partner also listed explicitly) is
/// kept at its first position, with analyses and tables of all occurrences
/// combined.
///
pub fn expand_all<P: PartnerLookup>(entities: &[Entity], lookup: &P) -> Expanded {
    let expansions: Vec<PartnerExpansion> = entities
        .par_iter()
        .map(|entity| expand(entity, lookup))
        .collect();

    let mut expanded = Expanded::default();
    let mut positions: HashMap<(String, Class), usize> = HashMap::new();

    for (parent, expansion) in entities.iter().zip(expansions) {
        if let Some(err) = expansion.error {
            expanded.errors.push((parent.id.clone(), err));
        }

        for entity in expansion.entities {
            let key = (entity.id.clone(), entity.class);
            match positions.get(&key) {
                Some(&i) => {
                    let kept = &mut expanded.entities[i];
                    kept.analyses.extend(entity.analyses);
                    kept.tables.extend(entity.tables);
                    kept.include_partners |= entity.include_partners;
                    if kept.coordinates.is_none() {
                        kept.coordinates = entity.coordinates;
                    }
                }
                None => {
                    positions.insert(key, expanded.entities.len());
                    expanded.entities.push(entity);
                }
            }
        }
    }

    expanded
}
