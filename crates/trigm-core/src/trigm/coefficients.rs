//! Threshold and coefficient tables
//!
//! For each degree `m` of the ladder the cosine and sine approximants are
//! `cos x ~ N_m(x^2) / D_m(x^2)` and `sin x ~ x S_m(x^2) / D_m(x^2)`, the real
//! and imaginary parts of the [m/m] Pade approximant of `e^x` evaluated at
//! `ix`. Coefficients are listed in ascending powers of `B = A^2`.
//!
//! # References
//!
//! - A. H. Al-Mohy, N. J. Higham, S. D. Relton, "New Algorithms for Computing
//!   the Matrix Sine and Cosine Separately or Simultaneously",
//!   SIAM J. Sci. Comput., vol. 37, no. 1, 2015
//! - A. H. Al-Mohy, N. J. Higham, "A New Scaling and Squaring Algorithm for
//!   the Matrix Exponential", SIAM J. Matrix Anal. Appl., vol. 31, no. 3, 2009

// ============================================================================
// Backward error thresholds
// ============================================================================

/// `THETA[m - 1]`: largest `alpha` with backward error bound `<= 2^-53` at degree `m`
pub(crate) const THETA: [f64; 21] = [
    3.650024139523051e-8,
    5.317232856892627e-4,
    1.495585217958292e-2,
    8.536352760102745e-2,
    2.539398330063232e-1,
    5.414660951208968e-1,
    9.504178996162932e-1,
    1.473163964234804e0,
    2.097847961257068e0,
    2.811644121620263e0,
    3.602330066265032e0,
    4.458935413036850e0,
    5.371920351148152e0,
    6.333131897833197e0,
    7.335666920593883e0,
    8.373706635544713e0,
    9.442353297358748e0,
    1.053748222747535e1,
    1.165561350236195e1,
    1.279380339874144e1,
    // 1.394955385079727e1 keeps kappa(D_21) near 10.75; lowered to hold it at 10.
    1.373666727242812e1,
];

/// Threshold for degree `m`
#[inline]
pub(crate) fn theta(m: usize) -> f64 {
    THETA[m - 1]
}

// ============================================================================
// Per-degree evaluation data
// ============================================================================

/// Immutable data for one ladder degree
#[derive(Debug)]
pub(crate) struct DegreeTable {
    /// Degree in `B`
    pub degree: usize,
    /// Paterson-Stockmeyer block size (highest cached power of `B`)
    pub block: usize,
    /// Numerator of the cosine approximant, degree `m`
    pub cos_num: &'static [f64],
    /// Sine numerator (without the leading factor `A`), degree `m - 1`
    pub sin_num: &'static [f64],
    /// Shared denominator, degree `m`
    pub den: &'static [f64],
}

macro_rules! degree {
    ($m:expr, $k:expr, $num:ident, $sin:ident, $den:ident) => {
        DegreeTable {
            degree: $m,
            block: $k,
            cos_num: &$num,
            sin_num: &$sin,
            den: &$den,
        }
    };
}

pub(crate) static DEGREES: [DegreeTable; 11] = [
    degree!(1, 1, COS_NUM_1, SIN_NUM_1, DEN_1),
    degree!(2, 2, COS_NUM_2, SIN_NUM_2, DEN_2),
    degree!(3, 3, COS_NUM_3, SIN_NUM_3, DEN_3),
    degree!(4, 4, COS_NUM_4, SIN_NUM_4, DEN_4),
    degree!(6, 3, COS_NUM_6, SIN_NUM_6, DEN_6),
    degree!(8, 4, COS_NUM_8, SIN_NUM_8, DEN_8),
    degree!(10, 5, COS_NUM_10, SIN_NUM_10, DEN_10),
    degree!(12, 4, COS_NUM_12, SIN_NUM_12, DEN_12),
    degree!(15, 5, COS_NUM_15, SIN_NUM_15, DEN_15),
    degree!(18, 6, COS_NUM_18, SIN_NUM_18, DEN_18),
    degree!(21, 7, COS_NUM_21, SIN_NUM_21, DEN_21),
];

/// Look up the table of a ladder degree
pub(crate) fn degree_table(m: usize) -> Option<&'static DegreeTable> {
    DEGREES.iter().find(|d| d.degree == m)
}

// ============================================================================
// Coefficients
// ============================================================================

// m = 1
const COS_NUM_1: [f64; 2] = [
    1.0,
    -0.25,
];

const SIN_NUM_1: [f64; 1] = [
    1.0,
];

const DEN_1: [f64; 2] = [
    1.0,
    0.25,
];

// m = 2
const COS_NUM_2: [f64; 3] = [
    1.0,
    -0.4166666666666667,
    0.006944444444444444,
];

const SIN_NUM_2: [f64; 2] = [
    1.0,
    -0.08333333333333333,
];

const DEN_2: [f64; 3] = [
    1.0,
    0.08333333333333333,
    0.006944444444444444,
];

// m = 3
const COS_NUM_3: [f64; 4] = [
    1.0,
    -0.45,
    0.018333333333333333,
    -6.944444444444444e-05,
];

const SIN_NUM_3: [f64; 3] = [
    1.0,
    -0.11666666666666667,
    0.0016666666666666668,
];

const DEN_3: [f64; 4] = [
    1.0,
    0.05,
    0.0016666666666666668,
    6.944444444444444e-05,
];

// m = 4
const COS_NUM_4: [f64; 5] = [
    1.0,
    -0.4642857142857143,
    0.02457482993197279,
    -0.00026927437641723355,
    3.5430839002267574e-07,
];

const SIN_NUM_4: [f64; 4] = [
    1.0,
    -0.13095238095238096,
    0.0031462585034013604,
    -1.417233560090703e-05,
];

const DEN_4: [f64; 5] = [
    1.0,
    0.03571428571428571,
    0.0007653061224489796,
    1.417233560090703e-05,
    3.5430839002267574e-07,
];

// m = 6
const COS_NUM_6: [f64; 7] = [
    1.0,
    -0.4772727272727273,
    0.030589990817263546,
    -0.0005826664917574009,
    3.848914833763319e-06,
    -7.78133669547811e-09,
    2.2593892844013093e-12,
];

const SIN_NUM_6: [f64; 6] = [
    1.0,
    -0.14393939393939395,
    0.004832415059687787,
    -5.411255411255411e-05,
    2.0497179588088678e-07,
    -1.8978869988971e-10,
];

const DEN_6: [f64; 7] = [
    1.0,
    0.022727272727272728,
    0.0002869605142332415,
    2.7329572784118238e-06,
    2.27746439867652e-08,
    1.8978869988971e-10,
    2.2593892844013093e-12,
];

// m = 8
const COS_NUM_8: [f64; 9] = [
    1.0,
    -0.48333333333333334,
    0.033482905982905986,
    -0.0007682595182595183,
    7.405195706477758e-06,
    -3.205385149829594e-08,
    5.940723209565479e-11,
    -3.796843531183266e-14,
    3.713657600922599e-18,
];

const SIN_NUM_8: [f64; 8] = [
    1.0,
    -0.15,
    0.0057051282051282055,
    -8.348133348133349e-05,
    5.386055065542245e-07,
    -1.5466094525923585e-09,
    1.7593824250130906e-12,
    -5.347666945328543e-16,
];

const DEN_8: [f64; 9] = [
    1.0,
    0.016666666666666666,
    0.00014957264957264957,
    9.712509712509713e-07,
    5.188306470357753e-09,
    2.470622128741787e-11,
    1.123010058518994e-13,
    5.347666945328543e-16,
    3.713657600922599e-18,
];

// m = 10
const COS_NUM_10: [f64; 11] = [
    1.0,
    -0.4868421052631579,
    0.035179376459725166,
    -0.0008860192276356526,
    1.0121259995456049e-05,
    -5.8568562287366905e-08,
    1.7793992871565316e-10,
    -2.775082852195442e-13,
    2.0172957286197132e-16,
    -5.334896653262991e-20,
    2.2247275451472023e-24,
];

const SIN_NUM_10: [f64; 10] = [
    1.0,
    -0.15350877192982457,
    0.006232008038672533,
    -0.00010358714122768221,
    8.352022872594014e-07,
    -3.4990933924036576e-09,
    7.667485752970666e-12,
    -8.315719745947514e-15,
    3.823505748191788e-18,
    -4.894400599323845e-22,
];

const DEN_10: [f64; 11] = [
    1.0,
    0.013157894736842105,
    9.165716147955027e-05,
    4.5262795792370504e-07,
    1.7920790189286963e-09,
    6.109360291802374e-12,
    1.885605028334066e-14,
    5.4973907531605424e-17,
    1.5857857941809257e-19,
    4.894400599323845e-22,
    2.2247275451472023e-24,
];

// m = 12
const COS_NUM_12: [f64; 13] = [
    1.0,
    -0.4891304347826087,
    0.03629377081645513,
    -0.0009666869599960835,
    1.2160982772706469e-05,
    -8.204971888783887e-08,
    3.158541029611187e-10,
    -7.090085657168364e-13,
    9.169284302195974e-16,
    -6.486796411705478e-19,
    2.2345985344982065e-22,
    -2.882364365746957e-26,
    5.960224081362608e-31,
];

const SIN_NUM_12: [f64; 12] = [
    1.0,
    -0.15579710144927536,
    0.006583625888918894,
    -0.00011790069060489915,
    1.0744465062544398e-06,
    -5.448833416743295e-09,
    1.600769729268731e-11,
    -2.7375394689213506e-14,
    2.6437233706828746e-17,
    -1.3321678152990844e-20,
    2.9496815206114988e-24,
    -1.8595899133851336e-28,
];

const DEN_12: [f64; 13] = [
    1.0,
    0.010869565217391304,
    6.188675848411198e-05,
    2.46757410223732e-07,
    7.775968809571386e-10,
    2.0735916825523694e-12,
    4.89714634880789e-15,
    1.059988387187855e-17,
    2.165008960759508e-20,
    4.2956526999196585e-23,
    8.591305399839317e-26,
    1.8595899133851336e-28,
    5.960224081362608e-31,
];

// m = 15
const COS_NUM_15: [f64; 16] = [
    1.0,
    -0.49137931034482757,
    0.03739485621174087,
    -0.0010488413998620103,
    1.4374657655866668e-05,
    -1.1046012559344335e-07,
    5.13816254283919e-10,
    -1.5108813449236022e-12,
    2.868658337213532e-15,
    -3.528350173946033e-18,
    2.7705600654720633e-21,
    -1.3390208382225804e-24,
    3.7157014728593803e-28,
    -5.198436030618811e-32,
    2.7881633278933334e-36,
    -2.4304073639237566e-41,
];

const SIN_NUM_15: [f64; 15] = [
    1.0,
    -0.15804597701149425,
    0.0069350860967983445,
    -0.00013287674033809587,
    1.3468066540428827e-06,
    -7.995001528327457e-09,
    2.9454206424139377e-11,
    -6.949256247799114e-14,
    1.0626700495418006e-16,
    -1.0475253398890589e-19,
    6.493645836336004e-23,
    -2.4055845443545273e-26,
    4.845465472641719e-30,
    -4.414630822348934e-34,
    1.1665955346834031e-38,
];

const DEN_15: [f64; 16] = [
    1.0,
    0.008620689655172414,
    3.853437266041309e-05,
    1.1927305823461194e-07,
    2.88099174479739e-10,
    5.804195822851884e-13,
    1.0182799689213832e-15,
    1.604432724140835e-18,
    2.3252648175954128e-21,
    3.16178199750736e-24,
    4.106210386373195e-27,
    5.184609073703529e-30,
    6.497003851758809e-33,
    8.329492117639498e-36,
    1.1665955346834031e-38,
    2.4304073639237566e-41,
];

// m = 18
const COS_NUM_18: [f64; 19] = [
    1.0,
    -0.4928571428571429,
    0.03812152133580705,
    -0.0011043449637919685,
    1.5942968809068228e-05,
    -1.3221768960217725e-07,
    6.841271421650511e-10,
    -2.3247858656456143e-12,
    5.3569508922695176e-15,
    -8.525559177612142e-18,
    9.441136905286886e-21,
    -7.255017876547116e-24,
    3.816370907920115e-27,
    -1.3374810644228572e-30,
    2.98173755421034e-34,
    -3.9139684285613683e-38,
    2.6389119679487032e-42,
    -6.909111843101228e-47,
    2.9621820253045e-52,
];

const SIN_NUM_18: [f64; 18] = [
    1.0,
    -0.1595238095238095,
    0.007169140383426097,
    -0.0001432029312213644,
    1.5465726922420026e-06,
    -1.0050592757657618e-08,
    4.1933194792884773e-11,
    -1.1698227223007404e-13,
    2.2366897509277614e-16,
    -2.9684634847326643e-19,
    2.7410536143153063e-22,
    -1.7470208562015263e-25,
    7.534152442148742e-29,
    -2.1214199558849287e-32,
    3.6742745032812276e-36,
    -3.5363280360152495e-40,
    1.563769067596929e-44,
    -2.026132505308278e-49,
];

const DEN_18: [f64; 19] = [
    1.0,
    0.007142857142857143,
    2.6283240568954855e-05,
    6.649776235029691e-08,
    1.3028558454211777e-10,
    2.111109008784316e-13,
    2.9510125929243123e-16,
    3.665854152701009e-19,
    4.138382151037675e-22,
    4.321618787633328e-25,
    4.236881164346399e-28,
    3.9504719481085315e-31,
    3.545295338046118e-34,
    3.0990343864039492e-37,
    2.6734251090441243e-40,
    2.314653774064177e-43,
    2.0666551554144436e-46,
    2.026132505308278e-49,
    2.9621820253045e-52,
];

// m = 21
const COS_NUM_21: [f64; 22] = [
    1.0,
    -0.49390243902439024,
    0.03863695297365732,
    -0.001144316449566301,
    1.7106871607683853e-05,
    -1.4915935653839679e-07,
    8.263333755379851e-10,
    -3.0731579512593868e-12,
    7.95974344314508e-15,
    -1.471489388596319e-17,
    1.972055412925838e-20,
    -1.931905000283607e-23,
    1.3858757408322604e-26,
    -7.245606145170269e-30,
    2.7279538927255178e-33,
    -7.2434277312551485e-37,
    1.3124231877320765e-40,
    -1.5417825974567672e-44,
    1.0824114234548143e-48,
    -3.9469835096468114e-53,
    5.632540060917918e-58,
    -1.3223042465837296e-63,
];

const SIN_NUM_21: [f64; 21] = [
    1.0,
    -0.16056910569105692,
    0.007336139965527235,
    -0.00015073669334525968,
    1.698056253399532e-06,
    -1.170310846041867e-08,
    5.2827494355558114e-11,
    -1.6334713440519415e-13,
    3.565597437934263e-16,
    -5.604108498018159e-19,
    6.417288121288135e-22,
    -5.380610320132007e-25,
    3.2985138895666478e-28,
    -1.4663691473285016e-31,
    4.6515409240593897e-35,
    -1.0254526556316271e-38,
    1.5079327810879795e-42,
    -1.3871835217711434e-46,
    7.183715691341288e-51,
    -1.7254388446916016e-55,
    1.2218091238433662e-60,
];

const DEN_21: [f64; 22] = [
    1.0,
    0.006097560975609756,
    1.906679479552769e-05,
    4.079606994538583e-08,
    6.724626914074587e-11,
    9.116320377932056e-14,
    1.0597291924361587e-16,
    1.0875710102998346e-19,
    1.0070101947220691e-22,
    8.556295772148298e-26,
    6.763870175611303e-29,
    5.032641499710792e-32,
    3.5601595215837516e-35,
    2.4163978653283384e-38,
    1.5871250346984158e-41,
    1.0173878427553948e-44,
    6.422903047698199e-48,
    4.0365152386238057e-51,
    2.562866818173845e-54,
    1.6860965909038454e-57,
    1.2218091238433662e-60,
    1.3223042465837296e-63,
];
