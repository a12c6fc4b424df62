//! Column header resolution
//!
//! CRM saved searches are edited by hand, so column order drifts between
//! exports. The header row is scanned once; fields it does not name are read
//! from fixed fallback positions instead.

const FIELD_COUNT: usize = 7;

/// Semantic fields read from an export row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Price,
    LaborHours,
    LaborCost,
    Description,
    ShowOnMobile,
}

impl Field {
    /// Header matching order. A column takes the first field it matches.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Id,
        Field::Name,
        Field::Price,
        Field::LaborHours,
        Field::LaborCost,
        Field::Description,
        Field::ShowOnMobile,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    /// Column used when the header does not name this field
    pub fn default_index(self) -> Option<usize> {
        match self {
            Field::Id => Some(0),
            Field::Name => Some(1),
            Field::LaborHours => Some(3),
            Field::Price => Some(5),
            Field::ShowOnMobile => Some(6),
            Field::Description => Some(8),
            Field::LaborCost => None,
        }
    }

    /// Whether a trimmed, lowercased header cell names this field
    fn matches(self, header: &str) -> bool {
        match self {
            Field::Id => header.contains("internal id"),
            Field::Name => header == "name",
            Field::Price => header.contains("sales price"),
            Field::LaborHours => header.contains("labor hours"),
            Field::LaborCost => header.contains("labor cost"),
            Field::Description => header.contains("description"),
            Field::ShowOnMobile => header.contains("show on mobile"),
        }
    }
}

/// Column positions discovered in the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: [Option<usize>; FIELD_COUNT],
}

impl HeaderMap {
    /// Build the map from the header row.
    ///
    /// Each column is assigned to the first field it matches. A field claimed
    /// by an earlier column keeps that column.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut map = Self::default();

        for (index, cell) in header.iter().enumerate() {
            let normalized = cell.as_ref().trim().to_lowercase();
            let Some(field) = Field::ALL.into_iter().find(|f| f.matches(&normalized)) else {
                continue;
            };
            let slot = &mut map.columns[field.slot()];
            if slot.is_none() {
                *slot = Some(index);
            }
        }

        map
    }

    /// Column index found in the header, if any
    pub fn mapped(&self, field: Field) -> Option<usize> {
        self.columns[field.slot()]
    }

    /// Column index to read: the header's, else the positional default
    pub fn index(&self, field: Field) -> Option<usize> {
        self.mapped(field).or_else(|| field.default_index())
    }

    /// Cell for `field` in `row`, or `None` when the row is too short
    pub fn resolve<'a, S: AsRef<str>>(&self, field: Field, row: &'a [S]) -> Option<&'a str> {
        self.index(field)
            .and_then(|i| row.get(i))
            .map(|cell| cell.as_ref())
    }

    /// Minimum row width accepted for data rows.
    ///
    /// Only columns named by the header count; fallback positions do not.
    pub fn required_width(&self) -> usize {
        self.columns.iter().flatten().max().copied().unwrap_or(0) + 1
    }
}
