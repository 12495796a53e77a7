//! The zone graph
//!
//! Immutable once built. Construction checks every structural rule of an
//! island, so lookups afterwards only fail for names that never belonged to
//! it.

use std::collections::VecDeque;
use std::path::PathBuf;

use hashbrown::{HashMap, HashSet};
use thiserror::Error;

use super::zone::{IslandDef, Zone, ZoneDef, ZoneId};

/// Island configuration errors
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("unknown zone '{0}'")]
    UnknownZone(String),

    #[error("zone '{0}' is defined more than once")]
    DuplicateZone(String),

    #[error("zone '{0}' has an empty loot table")]
    EmptyLootTable(String),

    #[error("zone '{name}' has hidden treasure chance {chance} outside [0, 1]")]
    TreasureChanceOutOfRange { name: String, chance: f64 },

    #[error("zone '{0}' must have treasure loot exactly when its treasure chance is non-zero")]
    TreasureLootMismatch(String),

    #[error("start zone '{0}' cannot also be the exit")]
    StartIsExit(String),

    #[error("the pirate needs at least one zone that is neither start nor exit")]
    NoLurkZones,

    #[error("too many zones ({0})")]
    TooManyZones(usize),

    #[error("could not read island file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid island definition: {0}")]
    Parse(String),
}

/// Validated island layout.
#[derive(Debug, Clone)]
pub struct ZoneGraph {
    zones: Vec<Zone>,
    by_name: HashMap<String, ZoneId>,
    start: ZoneId,
    exit: ZoneId,
    lurk: Vec<ZoneId>,
}

impl ZoneGraph {
    /// Resolve and validate an island definition.
    pub fn new(island: IslandDef) -> Result<Self, ZoneError> {
        let mut by_name = HashMap::with_capacity(island.zones.len());
        for (idx, def) in island.zones.iter().enumerate() {
            let id = ZoneId(u16::try_from(idx).map_err(|_| ZoneError::TooManyZones(island.zones.len()))?);
            if by_name.insert(def.name.clone(), id).is_some() {
                return Err(ZoneError::DuplicateZone(def.name.clone()));
            }
        }

        let resolve = |name: &str| -> Result<ZoneId, ZoneError> {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| ZoneError::UnknownZone(name.to_string()))
        };

        let start = resolve(&island.start)?;
        let exit = resolve(&island.exit)?;
        if start == exit {
            return Err(ZoneError::StartIsExit(island.start));
        }

        let mut zones = Vec::with_capacity(island.zones.len());
        for (idx, def) in island.zones.into_iter().enumerate() {
            check_loot(&def)?;
            let connections = def
                .connections
                .iter()
                .map(|name| resolve(name))
                .collect::<Result<Vec<_>, _>>()?;
            zones.push(Zone {
                id: ZoneId(idx as u16),
                name: def.name,
                description: def.description,
                connections,
                loot_table: def.loot_table,
                hidden_treasure: def.hidden_treasure,
                treasure_loot: def.treasure_loot,
            });
        }

        let lurk: Vec<ZoneId> = zones
            .iter()
            .map(|z| z.id)
            .filter(|&id| id != start && id != exit)
            .collect();
        if lurk.is_empty() {
            return Err(ZoneError::NoLurkZones);
        }

        Ok(Self {
            zones,
            by_name,
            start,
            exit,
            lurk,
        })
    }

    /// Zone by id.
    ///
    /// Ids are only handed out by this graph, so an id from another graph
    /// is a programming error.
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    /// Zone by name
    pub fn lookup(&self, name: &str) -> Result<&Zone, ZoneError> {
        self.id_of(name)
            .map(|id| self.zone(id))
            .ok_or_else(|| ZoneError::UnknownZone(name.to_string()))
    }

    pub fn id_of(&self, name: &str) -> Option<ZoneId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: ZoneId) -> &str {
        &self.zone(id).name
    }

    /// Names of the zones reachable in one move from `name`, in menu order
    pub fn connections(&self, name: &str) -> Result<Vec<&str>, ZoneError> {
        let zone = self.lookup(name)?;
        Ok(self.neighbours(zone.id).map(|z| z.name.as_str()).collect())
    }

    /// Zones reachable in one move from `id`, in menu order
    pub fn neighbours(&self, id: ZoneId) -> impl Iterator<Item = &Zone> + '_ {
        self.zone(id).connections.iter().map(|&c| self.zone(c))
    }

    pub fn is_exit(&self, name: &str) -> bool {
        self.id_of(name) == Some(self.exit)
    }

    pub fn start(&self) -> ZoneId {
        self.start
    }

    pub fn exit(&self) -> ZoneId {
        self.exit
    }

    /// Zones the pirate may occupy: everything but start and exit, in table order
    pub fn lurk_zones(&self) -> &[ZoneId] {
        &self.lurk
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Every zone reachable from the start by following connections,
    /// start included, in breadth-first order.
    pub fn reachable_from_start(&self) -> Vec<ZoneId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.start]);
        seen.insert(self.start);

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &next in &self.zone(id).connections {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        order
    }
}

fn check_loot(def: &ZoneDef) -> Result<(), ZoneError> {
    if def.loot_table.is_empty() {
        return Err(ZoneError::EmptyLootTable(def.name.clone()));
    }
    if !(0.0..=1.0).contains(&def.hidden_treasure) {
        return Err(ZoneError::TreasureChanceOutOfRange {
            name: def.name.clone(),
            chance: def.hidden_treasure,
        });
    }
    if (def.hidden_treasure == 0.0) != def.treasure_loot.is_empty() {
        return Err(ZoneError::TreasureLootMismatch(def.name.clone()));
    }
    Ok(())
}
