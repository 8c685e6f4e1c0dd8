mod float_keys;
