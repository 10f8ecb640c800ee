//! panel::dataset — the fixed quarterly macro panel used by the pipeline.
//!
//! Purpose
//! -------
//! Supply the reference dataset as an in-memory constant: 84 quarterly
//! observations of four Canadian-style labour-market aggregates —
//! employment, labour productivity, real wages, and the unemployment
//! rate. There is no file or network I/O anywhere in the crate; this
//! module is the single data source.
//!
//! Conventions
//! -----------
//! - Employment, productivity, and real wages are scaled index levels;
//!   unemployment is a rate in percent. All four series trend and carry a
//!   unit root in levels, so the standard analysis differences once.
//! - Column order is fixed: employment, productivity, real_wage,
//!   unemployment. Downstream reports rely on this order.
//!
//! Testing notes
//! -------------
//! - The integration suite pins the whole pipeline to this panel, so the
//!   values below are load-bearing for the end-to-end expectations and
//!   must not be edited casually.

use ndarray::Array2;

use crate::panel::data::Panel;

const EMPLOYMENT: [f64; 84] = [
    929.6100, 929.4998, 929.6825, 930.5158, 930.8318, 931.9273,
    932.6350, 933.2711, 933.3703, 933.1330, 933.6990, 934.0581,
    934.7519, 936.4079, 937.8292, 939.0211, 939.8543, 940.4565,
    940.9558, 941.5885, 942.1440, 943.3883, 944.2859, 945.0090,
    945.7266, 946.4148, 947.7157, 948.0951, 948.8126, 948.4712,
    948.0331, 949.0990, 950.0333, 950.9919, 952.0911, 953.2575,
    954.5638, 954.9861, 955.4794, 955.1559, 955.3529, 954.6553,
    953.6036, 953.0650, 953.3677, 954.0408, 954.1620, 953.9436,
    954.0032, 953.5459, 953.5281, 952.8272, 952.0734, 951.2750,
    950.8685, 950.2383, 949.4998, 949.6718, 949.3998, 948.7451,
    948.5412, 948.6179, 948.1717, 947.4172, 946.1358, 945.1031,
    944.4828, 943.9776, 943.5057, 943.5411, 944.4376, 945.4734,
    946.4422, 947.0336, 947.5036, 948.0476, 948.2129, 948.2244,
    948.9010, 950.0298, 951.0884, 951.9596, 953.0847, 953.8542,
];

const PRODUCTIVITY: [f64; 84] = [
    405.3700, 405.4357, 405.0890, 405.2750, 405.4094, 405.9568,
    405.9764, 405.6041, 405.8712, 406.3718, 406.4595, 407.0595,
    407.5512, 407.8630, 408.8433, 409.7566, 410.6982, 410.7917,
    411.1062, 411.1746, 411.5730, 412.4994, 413.5683, 413.4486,
    413.8130, 414.3544, 414.7015, 415.5017, 415.9220, 416.9348,
    416.8069, 417.0307, 417.1743, 417.0511, 417.4933, 417.8356,
    417.7740, 417.9975, 418.8276, 419.0284, 419.1358, 419.7740,
    420.0219, 420.3489, 419.7166, 419.6206, 419.3534, 420.0609,
    420.0000, 420.2541, 419.5184, 419.2464, 418.9721, 418.9566,
    418.9971, 419.1535, 419.3763, 419.8891, 420.2933, 420.2351,
    419.9951, 420.2608, 420.3527, 421.1422, 421.3244, 421.9493,
    421.5197, 421.4499, 421.4306, 420.8406, 420.4025, 420.2077,
    420.7359, 421.3200, 420.9516, 421.4174, 422.1707, 422.4651,
    422.0829, 422.1416, 422.4180, 423.5386, 423.9332, 423.5015,
];

const REAL_WAGE: [f64; 84] = [
    386.1400, 386.4663, 387.6723, 387.9749, 388.7098, 388.9433,
    389.0632, 389.3720, 389.7516, 389.8370, 388.9928, 389.0974,
    390.3339, 391.6038, 392.7443, 394.4141, 396.0753, 397.0741,
    397.2702, 398.0135, 399.4678, 399.8578, 400.4983, 400.6955,
    401.5475, 402.5895, 402.7681, 402.8941, 403.7250, 405.2047,
    406.1792, 406.6378, 407.3756, 407.2230, 407.8317, 406.9453,
    406.9070, 407.0215, 407.9592, 408.7422, 408.6393, 410.1693,
    411.9642, 411.5693, 412.0799, 412.7176, 414.1634, 413.6988,
    413.2423, 413.0522, 411.8277, 411.1720, 412.3516, 412.8117,
    413.4234, 413.5437, 413.0468, 413.7796, 414.3648, 415.9870,
    417.7732, 417.8176, 417.8682, 418.3391, 418.4502, 418.5073,
    418.4868, 418.7474, 418.3688, 418.3745, 418.0039, 418.1177,
    418.7112, 418.7400, 418.8073, 420.2209, 421.1260, 421.4691,
    421.9425, 422.0491, 422.0021, 421.9060, 422.8891, 423.3452,
];

const UNEMPLOYMENT: [f64; 84] = [
    9.5700, 9.5551, 9.7393, 9.4724, 9.2225, 9.2859,
    9.2427, 9.2924, 9.1948, 9.5974, 10.1135, 9.9914,
    9.7618, 10.2103, 9.8047, 9.8303, 9.3682, 9.3959,
    9.3095, 9.2293, 9.3292, 9.2389, 8.8355, 9.3144,
    9.0403, 9.1501, 8.9709, 9.2514, 9.6465, 9.4100,
    9.5343, 9.0883, 8.9596, 8.6957, 8.2669, 8.3685,
    8.7267, 8.3452, 8.5382, 8.5133, 8.4203, 8.3317,
    8.8378, 9.2314, 9.1057, 9.0825, 9.0657, 8.8870,
    8.6959, 8.1875, 7.7477, 7.7998, 7.9276, 8.0842,
    8.0484, 8.0960, 7.9668, 7.4059, 7.4084, 7.5094,
    7.9667, 7.7965, 7.8705, 8.0241, 7.9264, 7.9370,
    7.8138, 7.9495, 7.6489, 7.5136, 7.6626, 7.1026,
    6.8656, 6.5456, 6.5042, 6.4890, 6.4339, 6.1331,
    6.5605, 6.7000, 6.4347, 6.4718, 6.1995, 5.9550,
];

/// Number of time steps in the reference panel.
pub const PANEL_ROWS: usize = 84;

/// Number of variables in the reference panel.
pub const PANEL_COLS: usize = 4;

/// Build the fixed 84×4 reference macro panel.
///
/// Returns
/// -------
/// `Panel`
///   Columns, in order: employment, productivity, real_wage,
///   unemployment.
///
/// Panics
/// ------
/// - Never: the embedded constants are finite and rectangular by
///   construction, so `Panel::new` cannot fail here.
pub fn macro_panel() -> Panel {
    let mut values = Array2::zeros((PANEL_ROWS, PANEL_COLS));
    for t in 0..PANEL_ROWS {
        values[(t, 0)] = EMPLOYMENT[t];
        values[(t, 1)] = PRODUCTIVITY[t];
        values[(t, 2)] = REAL_WAGE[t];
        values[(t, 3)] = UNEMPLOYMENT[t];
    }
    let names = ["employment", "productivity", "real_wage", "unemployment"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    Panel::new(names, values).expect("embedded reference panel is finite and rectangular")
}
