use serde::{Deserialize, Serialize};

/// Axis-aligned box in one dimension, inclusive on every face.
///
/// Built from any two opposite corners; the min/max are sorted on
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoneCorners", into = "ZoneCorners")]
pub struct Zone {
    pub name: String,
    /// Dimension id, e.g. `minecraft:overworld`
    pub dimension: String,
    pub min: [f64; 3],
    pub max: [f64; 3],
}

/// On-disk form: two corners in any order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ZoneCorners {
    name: String,
    dimension: String,
    x1: f64,
    y1: f64,
    z1: f64,
    x2: f64,
    y2: f64,
    z2: f64,
}

impl From<ZoneCorners> for Zone {
    fn from(c: ZoneCorners) -> Self {
        Zone::new(c.name, c.dimension, [c.x1, c.y1, c.z1], [c.x2, c.y2, c.z2])
    }
}

impl From<Zone> for ZoneCorners {
    fn from(z: Zone) -> Self {
        ZoneCorners {
            name: z.name,
            dimension: z.dimension,
            x1: z.min[0],
            y1: z.min[1],
            z1: z.min[2],
            x2: z.max[0],
            y2: z.max[1],
            z2: z.max[2],
        }
    }
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        dimension: impl Into<String>,
        a: [f64; 3],
        b: [f64; 3],
    ) -> Self {
        Self {
            name: name.into(),
            dimension: dimension.into(),
            min: [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])],
            max: [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
        }
    }

    /// Inside the box, ignoring dimension.
    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        x >= self.min[0]
            && x <= self.max[0]
            && y >= self.min[1]
            && y <= self.max[1]
            && z >= self.min[2]
            && z <= self.max[2]
    }

    pub fn contains(&self, dimension: &str, x: f64, y: f64, z: f64) -> bool {
        self.dimension == dimension && self.contains_point(x, y, z)
    }

    /// Dimension without the `minecraft:` namespace.
    pub fn short_dimension(&self) -> &str {
        self.dimension
            .strip_prefix("minecraft:")
            .unwrap_or(&self.dimension)
    }

    /// `name (dimension) | (x, y, z) -> (x, y, z)`
    pub fn describe(&self) -> String {
        format!(
            "{} ({}) | ({}, {}, {}) -> ({}, {}, {})",
            self.name,
            self.short_dimension(),
            self.min[0],
            self.min[1],
            self.min[2],
            self.max[0],
            self.max[1],
            self.max[2]
        )
    }
}

/// Ordered list of zones; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn find(&self, dimension: &str, x: f64, y: f64, z: f64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(dimension, x, y, z))
    }

    pub fn is_protected(&self, dimension: &str, x: f64, y: f64, z: f64) -> bool {
        self.find(dimension, x, y, z).is_some()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    /// One listing line per zone, with a marker on zones containing the
    /// given position.
    pub fn describe_for(&self, dimension: &str, x: f64, y: f64, z: f64) -> Vec<String> {
        self.zones
            .iter()
            .map(|zone| {
                if zone.contains(dimension, x, y, z) {
                    format!("{} [you are here]", zone.describe())
                } else {
                    zone.describe()
                }
            })
            .collect()
    }
}
