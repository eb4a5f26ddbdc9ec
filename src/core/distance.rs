use crate::models::Location;

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// Kilometers per degree of latitude on the mean-radius sphere
const KM_PER_DEGREE: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

// Widening applied to bounding boxes so rounding never rejects a boundary point
const BOX_MARGIN: f64 = 1.001;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers. NaN inputs produce NaN.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push sqrt(a) a hair above 1.0 for antipodal points
    let c = 2.0 * a.sqrt().clamp(-1.0, 1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Geospatial bounding box used as a cheap pre-filter before haversine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    /// `None` when the box spans every longitude; may extend past ±180
    pub lon_range: Option<(f64, f64)>,
}

impl BoundingBox {
    /// Smallest lat/lon box containing every point within `radius_km` of `origin`
    pub fn around(origin: Location, radius_km: f64) -> Self {
        let radius_km = radius_km.max(0.0) * BOX_MARGIN;
        let lat_delta = radius_km / KM_PER_DEGREE;

        let min_lat = origin.latitude - lat_delta;
        let max_lat = origin.latitude + lat_delta;

        // Widest longitude offset on a small circle: asin(sin(r/R) / cos(lat))
        let angular = radius_km / EARTH_RADIUS_KM;
        let ratio = angular.sin() / origin.latitude.to_radians().cos();

        let crosses_pole = min_lat <= -90.0 || max_lat >= 90.0;
        let lon_range = if crosses_pole || angular >= std::f64::consts::FRAC_PI_2 || !(ratio < 1.0) {
            None
        } else {
            let lon_delta = ratio.asin().to_degrees();
            Some((origin.longitude - lon_delta, origin.longitude + lon_delta))
        };

        BoundingBox {
            min_lat: min_lat.max(-90.0),
            max_lat: max_lat.min(90.0),
            lon_range,
        }
    }

    /// Check if a point is within the box
    ///
    /// Longitudes are compared modulo 360 around the box centre, so ranges
    /// crossing the antimeridian and unnormalized longitudes both work. A
    /// latitude outside [-90, 90] has no place on the box and is passed
    /// through to the exact distance check.
    #[inline]
    pub fn contains(&self, location: &Location) -> bool {
        if !(-90.0..=90.0).contains(&location.latitude) {
            return true;
        }
        if location.latitude < self.min_lat || location.latitude > self.max_lat {
            return false;
        }
        match self.lon_range {
            Some((min_lon, max_lon)) => {
                let centre = (min_lon + max_lon) / 2.0;
                let lon = (location.longitude - centre + 180.0).rem_euclid(360.0) - 180.0 + centre;
                lon >= min_lon && lon <= max_lon
            }
            None => true,
        }
    }
}

/// Whether `target` lies within `radius_km` of `origin` (inclusive)
///
/// Non-finite coordinates are never in range.
#[inline]
pub fn is_within_radius(origin: &Location, target: &Location, radius_km: f64) -> bool {
    origin.distance_to(target) <= radius_km
}
