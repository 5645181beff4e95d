use psha_source::Mechanism;

use crate::{GmmContext, GmmPrediction, GroundMotionPredictor, Imt};

/// Regression coefficients for one intensity measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Constant term.
    pub a1: f64,
    /// Magnitude scaling below the hinge.
    pub a2: f64,
    /// Quadratic magnitude term.
    pub a3: f64,
    /// Geometric spreading.
    pub a4: f64,
    /// Magnitude-dependent geometric spreading.
    pub a5: f64,
    /// Fictitious depth in km.
    pub a6: f64,
    /// Magnitude scaling above the hinge.
    pub a7: f64,
    /// Normal faulting adjustment.
    pub a8: f64,
    /// Reverse faulting adjustment.
    pub a9: f64,
    /// Hinge magnitude.
    pub c1: f64,
    /// Vs30 cap of the linear site term, m/s.
    pub v_con: f64,
    /// Reference rock Vs30, m/s.
    pub v_ref: f64,
    /// Nonlinear site constant.
    pub c: f64,
    /// Nonlinear site exponent.
    pub n: f64,
    /// Linear site coefficient.
    pub b1: f64,
    /// Nonlinear site coefficient.
    pub b2: f64,
    /// Within-event standard deviation.
    pub phi: f64,
    /// Between-event standard deviation.
    pub tau: f64,
}

const PGA: Coefficients = Coefficients {
    a1: 1.85329,
    a2: 0.0029,
    a3: -0.02807,
    a4: -1.23452,
    a5: 0.2529,
    a6: 7.5,
    a7: -0.5096,
    a8: -0.1091,
    a9: 0.0937,
    c1: 6.75,
    v_con: 1000.0,
    v_ref: 750.0,
    c: 2.5,
    n: 3.2,
    b1: -0.41997,
    b2: -0.28846,
    phi: 0.6201,
    tau: 0.3501,
};

const PGV: Coefficients = Coefficients {
    a1: 5.61201,
    a2: 0.0029,
    a3: -0.09173,
    a4: -1.01495,
    a5: 0.2529,
    a6: 7.6,
    a7: -0.35317,
    a8: -0.00366,
    a9: 0.1118,
    c1: 6.75,
    v_con: 1000.0,
    v_ref: 750.0,
    c: 2.5,
    n: 3.2,
    b1: -0.72057,
    b2: -0.19688,
    phi: 0.6014,
    tau: 0.3311,
};

/// Akkar, Sandikkaya and Bommer (2014) model for Joyner-Boore distance.
///
/// The reference-rock prediction is corrected by a site term whose nonlinear
/// part is driven by the reference-rock PGA.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Asb14;

impl Asb14 {
    /// Coefficient set for `imt`.
    pub fn coefficients(imt: Imt) -> &'static Coefficients {
        match imt {
            Imt::Pga => &PGA,
            Imt::Pgv => &PGV,
        }
    }
}

impl GroundMotionPredictor for Asb14 {
    fn supported_imts(&self) -> &'static [Imt] {
        &[Imt::Pga, Imt::Pgv]
    }

    fn predict(&self, ctx: &GmmContext, imt: Imt) -> GmmPrediction {
        let (f_normal, f_reverse) = match Mechanism::from_rake(ctx.rake_deg) {
            Mechanism::Normal => (1.0, 0.0),
            Mechanism::Reverse => (0.0, 1.0),
            Mechanism::StrikeSlip => (0.0, 0.0),
        };
        let pga_ref = reference_log_mean(&PGA, ctx, f_normal, f_reverse).exp();
        let coeffs = Self::coefficients(imt);
        let log_mean = reference_log_mean(coeffs, ctx, f_normal, f_reverse)
            + site_amplification(coeffs, ctx.vs30, pga_ref);
        GmmPrediction::new(log_mean, coeffs.tau, coeffs.phi)
    }
}

fn reference_log_mean(c: &Coefficients, ctx: &GmmContext, f_normal: f64, f_reverse: f64) -> f64 {
    let m = ctx.magnitude;
    let magnitude_term = if m <= c.c1 {
        c.a2 * (m - c.c1)
    } else {
        c.a7 * (m - c.c1)
    };
    let spreading = (c.a4 + c.a5 * (m - c.c1)) * ctx.distance_km.hypot(c.a6).ln();
    c.a1 + magnitude_term + c.a3 * (8.5 - m).powi(2) + spreading + c.a8 * f_normal + c.a9 * f_reverse
}

fn site_amplification(c: &Coefficients, vs30: f64, pga_ref: f64) -> f64 {
    let ratio = vs30.min(c.v_con) / c.v_ref;
    let linear = c.b1 * ratio.ln();
    if vs30 > c.v_ref {
        return linear;
    }
    let stretched = ratio.powf(c.n);
    linear + c.b2 * ((pga_ref + c.c * stretched) / ((pga_ref + c.c) * stretched)).ln()
}
