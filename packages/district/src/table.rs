//! The compiled-in district table.
//!
//! Bounds extend 0.4 degrees from each center in every direction. Sample
//! incident locations come from the historical incident dataset used to
//! train the prediction models.

use crime_predict_district_models::{District, IncidentSample, IntensityTier};
use crime_predict_map_models::{BoundingBox, LatLng};

const fn high(
    lat: f64,
    lng: f64,
    description: &'static str,
    crime_types: &'static [&'static str],
) -> IncidentSample {
    IncidentSample {
        position: LatLng::new(lat, lng),
        description,
        tier: IntensityTier::High,
        crime_types,
    }
}

const HALF_SPAN: f64 = 0.4;

const fn district(
    name: &'static str,
    center: LatLng,
    aliases: &'static [&'static str],
    samples: &'static [IncidentSample],
) -> District {
    District {
        name,
        center,
        bounds: BoundingBox::around(center, HALF_SPAN),
        aliases,
        samples,
    }
}

/// All districts, in dropdown order.
pub const DISTRICTS: &[District] = &[
    district(
        "Anantapur",
        LatLng::new(14.6819, 77.6006),
        &["anantapur", "anantapuram", "anantpur"],
        &[
            high(15.1763, 77.6900, "Transport Hub", &["THEFT", "MOTOR VEHICLE THEFT"]),
            high(15.1735, 77.6938, "Residential Area", &["BURGLARY", "WEAPONS VIOLATION"]),
            high(15.1749, 77.7029, "Commercial Zone", &["THEFT", "DECEPTIVE PRACTICE"]),
            high(15.1425, 77.7269, "School Zone", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
        ],
    ),
    district(
        "Chittoor",
        LatLng::new(13.2172, 79.1003),
        &["chittoor", "chittur", "chittorgarh"],
        &[
            high(13.2172, 79.1003, "Market Complex", &["THEFT", "DECEPTIVE PRACTICE"]),
            high(13.2350, 79.0950, "Educational District", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(13.2100, 79.1100, "Residential Complex", &["BURGLARY", "WEAPONS VIOLATION"]),
            high(13.2200, 79.0900, "Transit Center", &["MOTOR VEHICLE THEFT", "NARCOTICS"]),
        ],
    ),
    district(
        "East Godavari",
        LatLng::new(17.2855, 82.0345),
        &["east godavari", "kakinada", "rajahmundry"],
        &[
            high(16.9891, 82.2475, "Port Area", &["THEFT", "NARCOTICS"]),
            high(17.0157, 82.2777, "Urban Center", &["WEAPONS VIOLATION", "BATTERY"]),
            high(16.9500, 82.2389, "School District", &["OFFENSE INVOLVING CHILDREN", "DECEPTIVE PRACTICE"]),
            high(17.0000, 82.2500, "Residential Zone", &["BURGLARY", "CRIM SEXUAL ASSAULT"]),
        ],
    ),
    district(
        "Guntur",
        LatLng::new(16.3067, 80.4365),
        &["guntur", "gunturu"],
        &[
            high(16.3067, 80.4365, "City Center", &["THEFT", "WEAPONS VIOLATION"]),
            high(16.3100, 80.4400, "Educational Hub", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(16.3200, 80.4300, "Transport Hub", &["MOTOR VEHICLE THEFT", "NARCOTICS"]),
            high(16.3150, 80.4450, "Residential Area", &["BURGLARY", "CRIM SEXUAL ASSAULT"]),
        ],
    ),
    district(
        "Krishna",
        LatLng::new(16.1697, 81.1339),
        &["krishna", "vijayawada", "machilipatnam"],
        &[
            high(16.5062, 80.6480, "Commercial Center", &["THEFT", "DECEPTIVE PRACTICE"]),
            high(16.4974, 80.6368, "School Zone", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(16.5141, 80.6343, "Transport Hub", &["MOTOR VEHICLE THEFT", "NARCOTICS"]),
            high(16.5200, 80.6400, "Residential District", &["BURGLARY", "WEAPONS VIOLATION"]),
        ],
    ),
    district(
        "Nellore",
        LatLng::new(14.4426, 79.9865),
        &["nellore", "nellur", "sri potti sriramulu nellore"],
        &[
            high(14.4426, 79.9865, "Urban Center", &["THEFT", "WEAPONS VIOLATION"]),
            high(14.4500, 79.9900, "Educational Zone", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(14.4450, 79.9850, "Transport Hub", &["MOTOR VEHICLE THEFT", "DECEPTIVE PRACTICE"]),
            high(14.4480, 79.9880, "Residential Area", &["BURGLARY", "CRIM SEXUAL ASSAULT"]),
        ],
    ),
    district(
        "Prakasam",
        LatLng::new(15.3485, 79.5603),
        &["prakasam", "ongole"],
        &[
            high(15.3485, 79.5603, "City Center", &["THEFT", "NARCOTICS"]),
            high(15.3500, 79.5650, "School District", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(15.3550, 79.5600, "Transport Area", &["MOTOR VEHICLE THEFT", "DECEPTIVE PRACTICE"]),
            high(15.3520, 79.5630, "Residential Zone", &["BURGLARY", "WEAPONS VIOLATION"]),
        ],
    ),
    district(
        "Srikakulam",
        LatLng::new(18.2949, 83.8938),
        &["srikakulam", "srikakulum", "srikalahasti"],
        &[
            high(18.2949, 83.8938, "Commercial Hub", &["THEFT", "DECEPTIVE PRACTICE"]),
            high(18.3000, 83.9000, "Educational Area", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(18.2900, 83.8900, "Transport Center", &["MOTOR VEHICLE THEFT", "NARCOTICS"]),
            high(18.2980, 83.8970, "Residential District", &["BURGLARY", "CRIM SEXUAL ASSAULT"]),
        ],
    ),
    district(
        "Vishakhapatnam",
        LatLng::new(17.6868, 83.2185),
        &["vishakhapatnam", "vizag", "visakhapatnam", "waltair"],
        &[
            high(17.7281, 83.3045, "Beach Road", &["THEFT", "WEAPONS VIOLATION"]),
            high(17.7079, 83.2978, "School Zone", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(17.7187, 83.3080, "Transport Hub", &["MOTOR VEHICLE THEFT", "DECEPTIVE PRACTICE"]),
            high(17.7150, 83.3000, "Port Area", &["NARCOTICS", "CRIM SEXUAL ASSAULT"]),
        ],
    ),
    district(
        "Vizianagaram",
        LatLng::new(18.1067, 83.3975),
        &["vizianagaram", "vijayanagaram"],
        &[
            high(18.1067, 83.3975, "City Center", &["THEFT", "WEAPONS VIOLATION"]),
            high(18.1100, 83.4000, "Educational Zone", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(18.1050, 83.3950, "Transport Area", &["MOTOR VEHICLE THEFT", "DECEPTIVE PRACTICE"]),
            high(18.1080, 83.3990, "Residential Complex", &["BURGLARY", "CRIM SEXUAL ASSAULT"]),
        ],
    ),
    district(
        "West Godavari",
        LatLng::new(16.9174, 81.3399),
        &["west godavari", "eluru", "bhimavaram"],
        &[
            high(16.9174, 81.3399, "Urban Center", &["THEFT", "NARCOTICS"]),
            high(16.9200, 81.3450, "School District", &["OFFENSE INVOLVING CHILDREN", "BATTERY"]),
            high(16.9150, 81.3380, "Transport Hub", &["MOTOR VEHICLE THEFT", "DECEPTIVE PRACTICE"]),
            high(16.9190, 81.3420, "Residential Area", &["BURGLARY", "WEAPONS VIOLATION"]),
        ],
    ),
];
