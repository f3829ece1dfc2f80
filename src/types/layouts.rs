//! Record layouts of the Bruker RAW1.01 format
//!
//! Offsets follow the GADDS 4.1 manual, appendix B. The file header occupies the first
//! 712 bytes; each range starts with a 304-byte header (its own `header_len`), followed
//! by `sup_len` bytes of supplemental records and `steps` little-endian f32 samples.

use crate::types::schema::{FieldDescriptor as F, FieldKind::*, HeaderSchema};

/// Version string stored in the first field of every RAW1.01 file.
pub const SIGNATURE: &[u8; 7] = b"RAW1.01";
/// Width of the version field holding the signature.
pub const SIGNATURE_LEN: usize = 8;
/// Offset of the first range record.
pub const FILE_HEADER_LEN: usize = 712;

pub static FILE_HEADER: HeaderSchema = HeaderSchema::from_static(
    "file_header",
    &[
        F::new("version", "Version", Bytes(8), 0),
        F::new("file_status", "File Status", U32, 8),
        F::new("range_cnt", "Range Count", U32, 12),
        F::new("m_date", "Measure Date", Bytes(10), 16),
        F::new("m_time", "Measure Time", Bytes(10), 26),
        F::new("user", "User", Bytes(72), 36),
        F::new("site", "Site", Bytes(218), 108),
        F::new("sample_id", "Sample ID", Bytes(60), 326),
        F::new("comment", "Comment", Bytes(160), 386),
        F::new("head_2", "head 2", Bytes(2), 546),
        F::new("c_goni", "Goniometer Model", U32, 548),
        F::new("c_goni_s", "Goniometer Stage", U32, 552),
        F::new("c_samp_l", "Sample Changer", U32, 556),
        F::new("c_goni_c", "Goniometer Controller", U32, 560),
        F::new("c_goni_r", "(R4) goniometer radius", F32, 564),
        F::new("fix_divr", "(R4) fixed divergence", F32, 568),
        F::new("fix_samp", "(R4) fixed sample slit", F32, 572),
        F::new("prim_ss", "primary Soller slit", U32, 576),
        F::new("prim_mon", "primary monochromator", U32, 580),
        F::new("fix_anti", "(R4) fixed antiscatter", F32, 584),
        F::new("fix_detc", "(R4) fixed detector slit", F32, 588),
        F::new("sec_ss", "secondary Soller slit", F32, 592),
        F::new("fix_tf", "fixed thin film attach", U32, 596),
        F::new("beta_f", "beta filter", Bytes(4), 600),
        F::new("sec_mon", "secondary monochromator", F32, 604),
        F::new("anode", "Anode Material", Bytes(4), 608),
        F::new("head_3", "head 3", Bytes(4), 612),
        F::new("alpha_ave", "Alpha Average", F64, 616),
        F::new("alpha_1", "Alpha 1", F64, 624),
        F::new("alpha_2", "Alpha 2", F64, 632),
        F::new("beta", "Beta", F64, 640),
        F::new("alpha_ratio", "Alpha ratio", F64, 648),
        F::new("unit_nm", "(C4) Unit Name", Bytes(4), 656),
        F::new("int_beta_a1", "Intensity Beta:a1", Bytes(4), 660),
        F::new("mea_time", "Measurement Time", F32, 664),
        F::new("head_4", "head 4", Bytes(43), 668),
        F::new("hard_dep", "hard_dep", Bytes(1), 711),
    ],
);

pub static RANGE_HEADER: HeaderSchema = HeaderSchema::from_static(
    "range_header",
    &[
        F::new("header_len", "Header Len", U32, 0),
        F::new("steps", "Steps", U32, 4),
        F::new("start_theta", "Start Theta", F64, 8),
        F::new("start_2th", "Start 2Theta", F64, 16),
        F::new("drive_chi", "Chi Start", F64, 24),
        F::new("drive_phi", "Phi Start", F64, 32),
        F::new("drive_x", "X Start", F64, 40),
        F::new("drive_y", "Y Start", F64, 48),
        F::new("drive_z", "Z Start", F64, 56),
        F::new("ig_1", "ig 1", U64, 64),
        F::new("ig_2", "ig 2", Bytes(6), 72),
        F::new("ig_2_1", "ig 2_1", I16, 78),
        F::new("var_antiscat", "(R8) variable antiscatter", F64, 80),
        F::new("ig_3", "ig 3", Bytes(6), 88),
        F::new("ig_3_1", "ig 3_1", I16, 94),
        F::new("dec_code", "Detector", U32, 96),
        F::new("hv", "High Voltage", F32, 100),
        F::new("amp_gain", "Amplifier Gain", F32, 104),
        F::new("dis1_ll", "Discriminator1 Lower Level", F32, 112),
        F::new("ig_4", "ig 4", U32, 116),
        F::new("ig_5", "ig 5", F64, 120),
        F::new("ig_6", "ig 6", F32, 128),
        F::new("ig_a", "ig a", F32, 132),
        F::new("ig_b", "ig b", Bytes(5), 136),
        F::new("ig_b_1", "ig b_1", Bytes(3), 141),
        F::new("aux1_start", "Aux Axis 1 start", F64, 144),
        F::new("aux2_start", "Aux Axis 2 start", F64, 152),
        F::new("aux3_start", "Aux Axis 3 start", F64, 160),
        F::new("scan_mode", "Scan Mode", Bytes(4), 168),
        F::new("ig_g", "ig g", U32, 172),
        F::new("ig_h", "ig h", U32, 172),
        F::new("step_size", "Step Size", F64, 176),
        F::new("ig_i", "ig i", F64, 184),
        F::new("step_time", "Time Per Step", F32, 192),
        F::new("scan_type", "Scan Type", U32, 196),
        F::new("delay_time", "Delay Time", F32, 200),
        F::new("ig_l", "ig l", U32, 204),
        F::new("rot_speed", "Rotation Speed", F32, 208),
        F::new("ig_m", "ig m", F32, 212),
        F::new("ig_n", "ig n", U32, 216),
        F::new("ig_o", "ig o", U32, 220),
        F::new("gen_v", "Generator Voltage", U32, 224),
        F::new("gen_a", "Generator Current", U32, 228),
        F::new("ig_p", "ig p", U32, 232),
        F::new("ig_q", "ig q", U32, 236),
        F::new("lambda", "Lambda", F64, 240),
        F::new("ig_r", "ig r", U32, 248),
        F::new("data_bits", "Len of each data in bits", U32, 252),
        F::new("sup_len", "supplementary header len", U32, 256),
        F::new("ig_t", "ig t", U32, 260),
        F::new("ig_u", "ig u", U32, 264),
        F::new("ig_v", "ig v", U32, 268),
        F::new("ig_w", "ig w", U32, 272),
        F::new("reserved", "Reserved for expansion", U32, 280),
    ],
);

/// Oscillation parameters.
pub static SUPP_100: HeaderSchema = HeaderSchema::from_static(
    "supplemental_100",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("osc_drv", "oscillation drive", F32, 8),
        F::new("osc_amp", "oscil amp[deg or mm]", F64, 16),
        F::new("osc_spd", "oscil spd[deg/s or mm/s]", F32, 24),
        F::new("reserved", "reserved for expansion", Bytes(12), 28),
    ],
);

/// Position sensitive detector parameters.
pub static SUPP_110: HeaderSchema = HeaderSchema::from_static(
    "supplemental_110",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("goni_2th", "2theta of goni[deg]", F32, 8),
        F::new("chnl", "first channel used", U32, 16),
        F::new("reserved", "reserved for expansion", Bytes(20), 20),
    ],
);

/// Optimized quantitative measurement description.
pub static SUPP_120: HeaderSchema = HeaderSchema::from_static(
    "supplemental_120",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("undefined", "undefined", Bytes(64), 8),
    ],
);

/// QCI parameters (obsolete).
pub static SUPP_130: HeaderSchema = HeaderSchema::from_static(
    "supplemental_130",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("var_type", "variable type", F32, 8),
        F::new(
            "comp_name",
            "ASCII:compound name",
            Trailing {
                length_field: "length",
            },
            12,
        ),
    ],
);

/// Free-text comment.
pub static SUPP_140: HeaderSchema = HeaderSchema::from_static(
    "supplemental_140",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new(
            "comment",
            "comment",
            Trailing {
                length_field: "length",
            },
            8,
        ),
    ],
);

/// 2theta region removed from search/match.
pub static SUPP_150: HeaderSchema = HeaderSchema::from_static(
    "supplemental_150",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("ex_start", "excld 2theta start [deg]", F32, 8),
        F::new("ex_end", "excld 2theta end [deg]", F32, 12),
        F::new("reserved", "reserved for expansion", Bytes(16), 16),
    ],
);

/// EVA display offsets.
pub static SUPP_190: HeaderSchema = HeaderSchema::from_static(
    "supplemental_190",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("2th_off", "2theta offset [deg]", F32, 8),
        F::new("int_off", "intensity offset [% max]", F32, 12),
        F::new("reserved", "reserved for expansion", Bytes(16), 16),
    ],
);

/// Area detector integration parameters.
pub static SUPP_200: HeaderSchema = HeaderSchema::from_static(
    "supplemental_200",
    &[
        F::new("type", "Record type", U32, 0),
        F::new("length", "record length", U32, 4),
        F::new("reserved", "reserved", U32, 8),
        F::new("int_start", "integration range start", F32, 16),
        F::new("int_end", "integration range end", F32, 20),
        F::new("chi_start", "int range chi start", F32, 24),
        F::new("chi_end", "int range chi end", F32, 28),
        F::new("norm", "Normalization method", U32, 32),
        F::new("prog", "program name", Bytes(20), 36),
        F::new("act_2th", "act 2th", F32, 56),
        F::new("act_omega", "act omega", F32, 60),
        F::new("act_phi", "act phi", F32, 64),
        F::new("act_psi", "act psi", F32, 68),
    ],
);
