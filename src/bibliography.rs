#![allow(dead_code)]

/// Some literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring, 1976: *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B. R. Bowring, 1983: *New equations for meridional distance*.
    /// Bull. Geodesique 57, 374–381.
    /// [DOI](https://doi.org/10.1007/BF02520940).
    Bow83,

    /// B.R. Bowring, 1985: *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202).
    Bow85,

    /// R.E. Deakin, M.N. Hunter and C.F.F. Karney, 2012:
    /// *A fresh look at the UTM projection: Karney-Krueger equations*.
    /// Surveying and Spatial Sciences Institute (SSSI)
    /// Land Surveying Commission National Conference,
    /// Melbourne, 18-21 April, 2012.
    Dea12,

    /// Toshio Fukushima, 1999: *Fast transform from geocentric to geodetic coordinates*.
    /// Journal of Geodesy, 73(11), pp.603–610
    /// [DOI](https://doi.org/10.1007/s001900050271)
    Fuk99,

    /// K. E. Engsager and K. Poder, 2007:
    /// *A highly accurate world wide algorithm for the transverse Mercator mapping (almost)*,
    /// in Proc. XXIII Intl. Cartographic Conf. (ICC2007), Moscow, p. 2.1.2.
    Eng07,

    /// Kenneth Gade, 2010: *A Non-singular Horizontal Position Representation*.
    /// The Journal of Navigation, 63(3), pp.395-417.
    /// [DOI](https://doi.org/10.1017/S0373463309990415)
    Gad10,

    /// Charles F.F. Karney, 2011: *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// Charles F.F. Karney, 2013: *Algorithms for geodesics*.
    /// Journal of Geodesy 87, 43–55.
    /// [DOI](https://doi.org/10.1007/s00190-012-0578-z)
    Kar13,

    /// L. Krüger, 1912: *Konforme Abbildung des Erdellipsoids in der Ebene*.
    /// Royal Prussian Geodetic Institute, New Series 52.
    /// [DOI](https://dx.doi.org/10.2312/GFZ.b103-krueger28).
    Kru12,

    /// National Geospatial-Intelligence Agency, 2014:
    /// *The Universal Grids and the Transverse Mercator and Polar Stereographic
    /// Map Projections*. NGA.SIG.0012_2.0.0_UTMUPS.
    Nga14,

    /// Ordnance Survey, 2020: *A guide to coordinate systems in Great Britain*.
    /// Version 3.6. Annex C: *Transverse Mercator map projection formulae*.
    Ord20,

    /// John P. Snyder, 1987: *Map Projections - A Working Manual*.
    /// U.S. Geological Survey Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395).
    Sny87,

    /// T. Vincenty, 1975: *Direct and Inverse Solutions of Geodesics on the Ellipsoid
    /// with application of nested equations*.
    /// Survey Review, 23(176): 88-93.
    /// [pdf](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
    Vin75,

    /// T. Vincenty, 1976: *Correspondence*. Survey Review. 23(180): 294.
    Vin76,
}
